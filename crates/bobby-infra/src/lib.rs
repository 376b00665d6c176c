//! Infrastructure layer for Bobby.
//!
//! Contains the concrete [`LlmProvider`](bobby_core::llm::provider::LlmProvider)
//! for OpenAI-compatible APIs, the `config.toml` loader, API key resolution,
//! and PDF document extraction for the system prompt context.

pub mod config;
pub mod document;
pub mod llm;
pub mod secret;
