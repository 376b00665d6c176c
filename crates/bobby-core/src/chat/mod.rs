//! Conversation handling for Bobby.
//!
//! History trimming, system prompt assembly, the per-turn request/stream
//! client, and the interactive session loop.

pub mod client;
pub mod history;
pub mod prompt;
pub mod session;
pub mod sink;

#[cfg(test)]
pub(crate) mod test_support;
