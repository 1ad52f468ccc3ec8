//! Per-request language selection.
//!
//! `language_middleware` decides the language once at the request boundary
//! and stores it in the request extensions. Handlers take it as an explicit
//! `RequestLanguage` argument.

use crate::AppState;
use axum::{
    body::Body,
    extract::{FromRequestParts, Query, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, Request, Uri},
    middleware::Next,
    response::Response,
};
use recetas_core::{LanguageConfig, LanguageSelection};
use serde::Deserialize;
use std::convert::Infallible;

pub const LANGUAGE_COOKIE: &str = "language";

/// One year.
const COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// The language chosen for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLanguage(pub LanguageSelection);

impl RequestLanguage {
    pub fn code(&self) -> &str {
        &self.0.code
    }
}

#[derive(Deserialize)]
struct LanguageParam {
    language: Option<String>,
}

fn query_language(uri: &Uri) -> Option<String> {
    Query::<LanguageParam>::try_from_uri(uri)
        .ok()
        .and_then(|Query(param)| param.language)
}

/// Value of cookie `name` across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

/// Pick the language for a request from its query string and headers.
pub fn detect(config: &LanguageConfig, uri: &Uri, headers: &HeaderMap) -> LanguageSelection {
    let query = query_language(uri);
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    config.select(
        query.as_deref(),
        cookie_value(headers, LANGUAGE_COOKIE),
        accept_language,
    )
}

/// `Set-Cookie` value remembering `code` for later requests.
pub fn language_cookie(code: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{LANGUAGE_COOKIE}={code}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; SameSite=Lax; HttpOnly"
    ))
    .ok()
}

/// Middleware that resolves the request language and persists explicit choices.
pub async fn language_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let selection = detect(&state.languages, request.uri(), request.headers());
    let persist = selection.should_persist().then(|| selection.code.clone());
    request.extensions_mut().insert(RequestLanguage(selection));

    let mut response = next.run(request).await;

    if let Some(cookie) = persist.as_deref().and_then(language_cookie) {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    response
}

impl FromRequestParts<AppState> for RequestLanguage {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(language) = parts.extensions.get::<RequestLanguage>() {
            return Ok(language.clone());
        }

        // Routes outside the middleware still get a language, without persisting it.
        Ok(RequestLanguage(detect(
            &state.languages,
            &parts.uri,
            &parts.headers,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recetas_core::LanguageSource;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_cookie_value() {
        let map = headers(&[
            (header::COOKIE, "session=abc; language=zh"),
            (header::COOKIE, "theme=dark"),
        ]);
        assert_eq!(cookie_value(&map, "language"), Some("zh"));
        assert_eq!(cookie_value(&map, "theme"), Some("dark"));
        assert_eq!(cookie_value(&map, "missing"), None);
    }

    #[test]
    fn test_detect_precedence() {
        let config = LanguageConfig::default();
        let map = headers(&[
            (header::COOKIE, "language=zh"),
            (header::ACCEPT_LANGUAGE, "en-US,en;q=0.9"),
        ]);

        let uri: Uri = "/?language=en".parse().unwrap();
        let selection = detect(&config, &uri, &map);
        assert_eq!(selection.code, "en");
        assert_eq!(selection.source, LanguageSource::Query);

        let uri: Uri = "/?language=fr".parse().unwrap();
        assert_eq!(detect(&config, &uri, &map).code, "zh");

        let uri: Uri = "/".parse().unwrap();
        let no_cookie = headers(&[(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")]);
        assert_eq!(detect(&config, &uri, &no_cookie).code, "en");
        assert_eq!(detect(&config, &uri, &HeaderMap::new()).code, "es");
    }

    #[test]
    fn test_language_cookie_format() {
        let cookie = language_cookie("en").unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "language=en; Path=/; Max-Age=31536000; SameSite=Lax; HttpOnly"
        );
    }
}
