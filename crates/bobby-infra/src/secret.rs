//! API key resolution.
//!
//! The key is read from the environment variable named in the provider
//! settings and kept in a [`SecretString`] so it never shows up in `Debug`
//! output or logs.

use secrecy::SecretString;

use bobby_types::error::ConfigError;

/// Read the API key from the process environment.
pub fn resolve_api_key(env_var: &str) -> Result<SecretString, ConfigError> {
    resolve_api_key_with(env_var, |name| std::env::var(name).ok())
}

/// Resolve the API key through `lookup`. Blank values count as missing.
pub fn resolve_api_key_with<F>(env_var: &str, lookup: F) -> Result<SecretString, ConfigError>
where
    F: FnOnce(&str) -> Option<String>,
{
    match lookup(env_var) {
        Some(value) if !value.trim().is_empty() => Ok(SecretString::from(value.trim().to_string())),
        _ => Err(ConfigError::MissingApiKey(env_var.to_string())),
    }
}
