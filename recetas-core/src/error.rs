use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("Base language {0} must be in the supported set")]
    BaseLanguageMissing(&'static str),

    #[error("Default language {0} is not in the supported set")]
    UnsupportedDefault(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Recipe file {0} has no content")]
    Empty(String),

    #[error("Invalid translation file: {0}")]
    InvalidTranslations(String),
}
