//! Interactive chat session loop.
//!
//! `ChatSession` owns the conversation history and drives the
//! read-send-append cycle until the user types the exit keyword, input
//! ends, or an interrupt arrives. Turn failures never end the loop: they
//! are recorded as the assistant's reply like any other response.

use std::future::Future;

use tracing::{debug, info};

use bobby_types::llm::Message;

use super::client::ConversationClient;
use super::sink::TokenSink;

/// Typing this (any case) ends the session.
pub const EXIT_KEYWORD: &str = "exit";

/// Events produced by an input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User submitted a line.
    Line(String),
    /// End of input (Ctrl+D or closed stdin).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Source of user input lines.
pub trait InputSource {
    /// Wait for the next line or control event.
    fn read_line(&mut self) -> impl Future<Output = InputEvent>;
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    ExitKeyword,
    Eof,
    Interrupted,
}

/// A single conversation: the client plus the history it accumulates.
#[derive(Debug)]
pub struct ChatSession {
    client: ConversationClient,
    history: Vec<Message>,
    turn_count: u32,
}

impl ChatSession {
    pub fn new(client: ConversationClient) -> Self {
        Self {
            client,
            history: Vec::new(),
            turn_count: 0,
        }
    }

    /// Full, untrimmed conversation so far.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Completed user + assistant exchanges.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Run the interaction loop until exit, end of input, or interrupt.
    pub async fn run<I, S>(&mut self, input: &mut I, sink: &mut S) -> SessionEnd
    where
        I: InputSource,
        S: TokenSink + ?Sized,
    {
        loop {
            let line = match input.read_line().await {
                InputEvent::Line(line) => line,
                InputEvent::Eof => {
                    info!(turns = self.turn_count, "Input closed, ending session");
                    return SessionEnd::Eof;
                }
                InputEvent::Interrupted => {
                    info!(turns = self.turn_count, "Interrupted, ending session");
                    return SessionEnd::Interrupted;
                }
            };

            let line = line.trim();
            if line.eq_ignore_ascii_case(EXIT_KEYWORD) {
                info!(turns = self.turn_count, "Exit requested");
                return SessionEnd::ExitKeyword;
            }
            if line.is_empty() {
                continue;
            }

            self.take_turn(line, sink).await;
        }
    }

    /// Append the user's message, ask the model, and append its reply.
    ///
    /// Always grows the history by exactly two messages and returns the
    /// assistant's text (which may be a failure message).
    pub async fn take_turn<S>(&mut self, user_input: &str, sink: &mut S) -> String
    where
        S: TokenSink + ?Sized,
    {
        self.history.push(Message::user(user_input));

        let request = self.client.request_for(&self.history);
        let reply = self.client.send_and_stream(request, sink).await;

        self.history.push(Message::assistant(reply.clone()));
        self.turn_count += 1;
        debug!(
            turn = self.turn_count,
            history_len = self.history.len(),
            "Turn recorded"
        );
        reply
    }
}
