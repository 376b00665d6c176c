//! Conversation logic and provider trait definitions for Bobby.
//!
//! This crate defines the "ports" the infrastructure layer implements
//! (`LlmProvider`) and the ones the console implements (`TokenSink`,
//! `InputSource`). It depends only on `bobby-types` -- never on
//! `bobby-infra` or any HTTP/IO crate.

pub mod chat;
pub mod llm;
