//! LLM provider abstractions for Bobby.
//!
//! - `LlmProvider`: trait for concrete provider implementations
//! - `BoxLlmProvider`: object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
