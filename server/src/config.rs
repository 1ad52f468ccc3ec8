use recetas_core::{ConfigError, LanguageConfig, BASE_LANGUAGE};
use std::env;

/// Server settings read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub languages: LanguageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source. Unset and blank values take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var("RECETAS_PORT", "5014");
        let port = port.parse().map_err(|_| ConfigError::InvalidValue {
            name: "RECETAS_PORT",
            reason: format!("'{port}' is not a port number"),
        })?;

        let languages = LanguageConfig::from_list(
            &var("RECETAS_LANGUAGES", "es,en,zh"),
            &var("RECETAS_DEFAULT_LANGUAGE", BASE_LANGUAGE),
        )?;

        Ok(Config {
            database_url: var("DATABASE_URL", "recipes.db"),
            host: var("RECETAS_HOST", "0.0.0.0"),
            port,
            languages,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
