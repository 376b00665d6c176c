//! Session configuration types for Bobby.
//!
//! `SessionConfig` is read from `config.toml`, adjusted by command-line
//! overrides, validated once, and then owned by the conversation client
//! for the rest of the session.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Everything a chat session needs to know before the first turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Number of most-recent history messages sent with each request.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Wall-clock deadline for one request including its whole stream.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on generated tokens per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Who the assistant says it is in the system prompt.
    #[serde(default)]
    pub persona: Persona,

    /// Fixed example exchanges placed right after the system prompt.
    #[serde(default)]
    pub examples: Vec<FewShotExample>,

    /// Optional PDF whose text is injected into the system prompt.
    #[serde(default)]
    pub document_path: Option<PathBuf>,

    #[serde(default)]
    pub provider: ProviderSettings,
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_history() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    256
}

fn default_temperature() -> f64 {
    0.5
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_history: default_max_history(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            persona: Persona::default(),
            examples: Vec::new(),
            document_path: None,
            provider: ProviderSettings::default(),
        }
    }
}

impl SessionConfig {
    /// The per-turn deadline as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the invariants the client relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "model",
                reason: "must not be empty".to_string(),
            });
        }
        if self.max_history == 0 {
            return Err(ConfigError::Invalid {
                field: "max_history",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout_secs",
                reason: "must be at least 1 second".to_string(),
            });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid {
                field: "max_tokens",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid {
                field: "temperature",
                reason: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        Ok(())
    }
}

/// Identity of the assistant rendered into the system prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default = "default_persona_name")]
    pub name: String,
    #[serde(default = "default_persona_creator")]
    pub creator: String,
}

fn default_persona_name() -> String {
    "Bobby".to_string()
}

fn default_persona_creator() -> String {
    "Huajun".to_string()
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            creator: default_persona_creator(),
        }
    }
}

/// A user input and the answer the model should imitate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FewShotExample {
    pub input: String,
    pub output: String,
}

/// Where and how to reach the chat-completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Human-readable name used in logs and spans.
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default_values() {
        let config = SessionConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_history, 10);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_tokens, 256);
        assert!((config.temperature - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.persona.name, "Bobby");
        assert!(config.examples.is_empty());
        assert!(config.document_path.is_none());
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_config_deserialize_with_defaults() {
        let config: SessionConfig = toml::from_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_session_config_deserialize_with_values() {
        let toml_str = r#"
model = "gpt-4"
max_history = 4
timeout_secs = 5
temperature = 0.0
document_path = "../data/paper.pdf"

[persona]
name = "Ada"

[[examples]]
input = "2+2"
output = "4"

[[examples]]
input = "2+3"
output = "5"

[provider]
base_url = "http://localhost:8080/v1"
"#;
        let config: SessionConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.max_history, 4);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.persona.name, "Ada");
        assert_eq!(config.persona.creator, "Huajun");
        assert_eq!(config.examples.len(), 2);
        assert_eq!(config.examples[1].output, "5");
        assert_eq!(
            config.document_path.as_deref(),
            Some(std::path::Path::new("../data/paper.pdf"))
        );
        assert_eq!(config.provider.base_url, "http://localhost:8080/v1");
        assert_eq!(config.provider.name, "openai");
    }

    #[test]
    fn test_validate_rejects_zero_history() {
        let config = SessionConfig {
            max_history: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_history"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = SessionConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        let config = SessionConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_model() {
        let config = SessionConfig {
            model: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
