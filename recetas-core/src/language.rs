//! Supported languages and per-request language negotiation.

use crate::error::ConfigError;
use serde::Serialize;

/// The language recipes are authored in. Overlays never apply to it.
pub const BASE_LANGUAGE: &str = "es";

/// Languages with known display names. Only the configured subset is served.
const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("es", "Español"),
    ("en", "English"),
    ("zh", "中文"),
    ("ca", "Valencià"),
    ("eu", "Euskera"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SupportedLanguage {
    pub code: String,
    pub name: String,
}

/// The set of languages the application serves, plus the fallback.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    supported: Vec<SupportedLanguage>,
    default: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        LanguageConfig::new(&["es", "en", "zh"], BASE_LANGUAGE)
            .expect("built-in language set is valid")
    }
}

impl LanguageConfig {
    pub fn new(codes: &[&str], default: &str) -> Result<Self, ConfigError> {
        let mut supported: Vec<SupportedLanguage> = Vec::with_capacity(codes.len());
        for code in codes {
            let code = code.trim().to_lowercase();
            if code.is_empty() || supported.iter().any(|l| l.code == code) {
                continue;
            }
            let name = KNOWN_LANGUAGES
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, n)| n.to_string())
                .ok_or_else(|| ConfigError::UnknownLanguage(code.clone()))?;
            supported.push(SupportedLanguage { code, name });
        }

        if !supported.iter().any(|l| l.code == BASE_LANGUAGE) {
            return Err(ConfigError::BaseLanguageMissing(BASE_LANGUAGE));
        }
        let default = default.trim().to_lowercase();
        if !supported.iter().any(|l| l.code == default) {
            return Err(ConfigError::UnsupportedDefault(default));
        }

        Ok(LanguageConfig { supported, default })
    }

    /// Parse a comma-separated list such as `"es,en,zh"`.
    pub fn from_list(list: &str, default: &str) -> Result<Self, ConfigError> {
        let codes: Vec<&str> = list.split(',').collect();
        Self::new(&codes, default)
    }

    pub fn supported(&self) -> &[SupportedLanguage] {
        &self.supported
    }

    pub fn default_code(&self) -> &str {
        &self.default
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|l| l.code == code)
    }

    /// Best supported match for an `Accept-Language` header value.
    ///
    /// Entries are tried in descending q-value order (ties keep header order).
    /// Each entry matches its exact code first, then its primary subtag,
    /// so `en-US` selects `en`. Entries with `q=0` are ignored, and `*`
    /// matches the first supported language.
    pub fn best_match(&self, accept_language: &str) -> Option<&str> {
        let mut entries: Vec<(String, f32)> = accept_language
            .split(',')
            .filter_map(parse_accept_entry)
            .filter(|(_, q)| *q > 0.0)
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));

        entries.iter().find_map(|(tag, _)| {
            if tag == "*" {
                return self.supported.first().map(|l| l.code.as_str());
            }
            let primary = tag
                .split(|c: char| c == '-' || c == '_')
                .next()
                .unwrap_or(tag.as_str());
            self.supported
                .iter()
                .find(|l| l.code == *tag)
                .or_else(|| self.supported.iter().find(|l| l.code == primary))
                .map(|l| l.code.as_str())
        })
    }

    /// Pick the language for one request.
    ///
    /// Precedence: explicit query parameter, then the persisted choice, then
    /// `Accept-Language`, then the configured default. Unsupported values at
    /// any step are skipped.
    pub fn select(
        &self,
        query: Option<&str>,
        persisted: Option<&str>,
        accept_language: Option<&str>,
    ) -> LanguageSelection {
        if let Some(code) = query.filter(|c| self.is_supported(c)) {
            return LanguageSelection::new(code, LanguageSource::Query);
        }
        if let Some(code) = persisted.filter(|c| self.is_supported(c)) {
            return LanguageSelection::new(code, LanguageSource::Persisted);
        }
        if let Some(code) = accept_language.and_then(|h| self.best_match(h)) {
            return LanguageSelection::new(code, LanguageSource::AcceptLanguage);
        }
        LanguageSelection::new(&self.default, LanguageSource::Default)
    }
}

fn parse_accept_entry(entry: &str) -> Option<(String, f32)> {
    let mut parts = entry.split(';');
    let tag = parts.next()?.trim().to_lowercase();
    if tag.is_empty() {
        return None;
    }
    let mut q = 1.0;
    for param in parts {
        if let Some(value) = param.trim().strip_prefix("q=") {
            q = value.trim().parse().ok()?;
        }
    }
    Some((tag, q))
}

/// Where a request's language came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum LanguageSource {
    Query,
    Persisted,
    AcceptLanguage,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelection {
    pub code: String,
    pub source: LanguageSource,
}

impl LanguageSelection {
    fn new(code: &str, source: LanguageSource) -> Self {
        LanguageSelection {
            code: code.to_string(),
            source,
        }
    }

    /// Whether the choice should be remembered for later requests.
    pub fn should_persist(&self) -> bool {
        self.source == LanguageSource::Query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LanguageConfig::default();
        assert_eq!(config.default_code(), "es");
        assert!(config.is_supported("en"));
        assert!(config.is_supported("zh"));
        assert!(!config.is_supported("ca"));
        assert_eq!(config.supported()[2].name, "中文");
    }

    #[test]
    fn test_from_list_with_regional_languages() {
        let config = LanguageConfig::from_list("es, en, zh, ca, eu", "es").unwrap();
        assert!(config.is_supported("ca"));
        assert!(config.is_supported("eu"));
        assert_eq!(config.supported().len(), 5);
    }

    #[test]
    fn test_config_rejects_unknown_and_missing_base() {
        assert!(matches!(
            LanguageConfig::from_list("es,fr", "es"),
            Err(ConfigError::UnknownLanguage(code)) if code == "fr"
        ));
        assert!(matches!(
            LanguageConfig::from_list("en,zh", "en"),
            Err(ConfigError::BaseLanguageMissing(_))
        ));
        assert!(matches!(
            LanguageConfig::from_list("es,en", "zh"),
            Err(ConfigError::UnsupportedDefault(_))
        ));
    }

    #[test]
    fn test_query_beats_persisted() {
        let config = LanguageConfig::default();
        let selection = config.select(Some("en"), Some("zh"), None);
        assert_eq!(selection.code, "en");
        assert!(selection.should_persist());
    }

    #[test]
    fn test_invalid_query_falls_through() {
        let config = LanguageConfig::default();
        let selection = config.select(Some("invalid"), Some("zh"), None);
        assert_eq!(selection.code, "zh");
        assert_eq!(selection.source, LanguageSource::Persisted);
        assert!(!selection.should_persist());

        let selection = config.select(Some("invalid"), None, None);
        assert_eq!(selection.code, "es");
        assert_eq!(selection.source, LanguageSource::Default);
    }

    #[test]
    fn test_stale_persisted_value_is_ignored() {
        let config = LanguageConfig::default();
        let selection = config.select(None, Some("eu"), Some("en-GB,en;q=0.9"));
        assert_eq!(selection.code, "en");
        assert_eq!(selection.source, LanguageSource::AcceptLanguage);
    }

    #[test]
    fn test_best_match_orders_by_quality() {
        let config = LanguageConfig::default();
        assert_eq!(config.best_match("fr;q=0.9, zh;q=0.8, en;q=0.5"), Some("zh"));
        assert_eq!(config.best_match("en;q=0.2, zh-CN;q=0.7"), Some("zh"));
        assert_eq!(config.best_match("de, fr"), None);
        assert_eq!(config.best_match("en;q=0"), None);
        assert_eq!(config.best_match(""), None);
    }

    #[test]
    fn test_wildcard_matches_first_supported_language() {
        let config = LanguageConfig::from_list("zh,es,en", "en").unwrap();
        assert_eq!(config.best_match("*"), Some("zh"));
        assert_eq!(config.best_match("de, *;q=0.5"), Some("zh"));
        assert_eq!(config.best_match("*;q=0.1, en"), Some("en"));
        assert_eq!(config.best_match("*;q=0"), None);

        let selection = config.select(None, None, Some("*"));
        assert_eq!(selection.code, "zh");
        assert_eq!(selection.source, LanguageSource::AcceptLanguage);
    }

    #[test]
    fn test_best_match_prefers_header_order_on_ties() {
        let config = LanguageConfig::default();
        assert_eq!(config.best_match("zh, en"), Some("zh"));
        assert_eq!(config.best_match("EN-us, es"), Some("en"));
    }
}
