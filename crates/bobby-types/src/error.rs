use thiserror::Error;

/// Errors raised while loading or validating session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("missing API key: environment variable '{0}' is not set")]
    MissingApiKey(String),
}
