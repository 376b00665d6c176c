//! Shared domain types for Bobby.
//!
//! Messages, completion requests, streaming events, session configuration,
//! and their error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod llm;
