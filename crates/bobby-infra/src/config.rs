//! Session configuration loader for Bobby.
//!
//! Reads `config.toml` from the data directory (`~/.bobby/` by default) and
//! deserializes it into [`SessionConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use bobby_types::config::SessionConfig;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `BOBBY_DATA_DIR` environment variable
/// 2. `~/.bobby`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BOBBY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".bobby");
    }

    PathBuf::from(".bobby")
}

/// Default location of the config file: `{data_dir}/config.toml`.
pub fn default_config_path() -> PathBuf {
    resolve_data_dir().join("config.toml")
}

/// Load session configuration from `config_path`.
///
/// - If the file does not exist, returns [`SessionConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config. Validation is left to the caller,
///   which may still apply command-line overrides.
pub async fn load_session_config(config_path: &Path) -> SessionConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", config_path.display());
            return SessionConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return SessionConfig::default();
        }
    };

    match toml::from_str::<SessionConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            SessionConfig::default()
        }
    }
}
