//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `bobby-core`, plus a factory ([`create_provider`]) that
//! builds it from the session's [`ProviderSettings`].
//!
//! [`LlmProvider`]: bobby_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::{ExposeSecret, SecretString};

use bobby_core::llm::box_provider::BoxLlmProvider;
use bobby_types::config::ProviderSettings;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] for the configured endpoint.
///
/// # Arguments
///
/// * `settings` - Provider name and base URL from `config.toml`
/// * `model` - Default model identifier when a request carries none
/// * `api_key` - The resolved API key
pub fn create_provider(
    settings: &ProviderSettings,
    model: &str,
    api_key: &SecretString,
) -> BoxLlmProvider {
    let config = OpenAiCompatConfig {
        provider_name: settings.name.clone(),
        base_url: settings.base_url.clone(),
        api_key: api_key.expose_secret().to_string(),
        model: model.to_string(),
    };
    tracing::debug!(
        provider = %config.provider_name,
        base_url = %config.base_url,
        model = %config.model,
        "Creating LLM provider"
    );
    BoxLlmProvider::new(OpenAiCompatibleProvider::new(config))
}
