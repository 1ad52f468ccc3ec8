use crate::api::found;
use crate::language::language_cookie;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::IntoResponse,
};

#[utoipa::path(
    get,
    path = "/set_language/{lang}",
    tag = "language",
    params(
        ("lang" = String, Path, description = "Language code to remember")
    ),
    responses(
        (status = 302, description = "Back to the referring page, or the index. Sets the language cookie when the code is supported.")
    )
)]
pub async fn set_language(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let target = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("/");

    let mut response = found(target);

    if state.languages.is_supported(&lang) {
        if let Some(cookie) = language_cookie(&lang) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    } else {
        tracing::debug!(language = %lang, "ignoring unsupported language");
    }

    response
}
