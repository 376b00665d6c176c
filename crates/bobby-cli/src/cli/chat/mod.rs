//! Interactive console chat for Bobby.
//!
//! Wires the config, provider, and document context into a
//! `ChatSession`, then runs it against rustyline input and a streaming
//! console sink. Entry point: `loop_runner::run_chat_loop`.

pub mod input;
pub mod loop_runner;
pub mod renderer;
