//! In-memory doubles for provider, input, and output used by chat tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use futures_util::StreamExt;

use bobby_types::config::SessionConfig;
use bobby_types::llm::{CompletionRequest, LlmError, StreamEvent};

use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::provider::{EventStream, LlmProvider};

use super::client::ConversationClient;
use super::session::{InputEvent, InputSource};
use super::sink::TokenSink;

pub const TEST_SYSTEM_PROMPT: &str = "You are Bobby, a test assistant.";

/// One scripted response: the events to emit, optionally followed by a
/// stream that never yields again.
pub struct Script {
    events: Vec<Result<StreamEvent, LlmError>>,
    stall: bool,
}

impl Script {
    /// Emit the tokens as text deltas, then complete.
    pub fn reply(tokens: &[&str]) -> Self {
        let mut events = vec![Ok(StreamEvent::Connected)];
        events.extend(tokens.iter().map(|t| {
            Ok(StreamEvent::TextDelta {
                text: (*t).to_string(),
            })
        }));
        events.push(Ok(StreamEvent::Done));
        Self {
            events,
            stall: false,
        }
    }

    /// Emit the tokens, then hang without a completion signal.
    pub fn stall_after(tokens: &[&str]) -> Self {
        let mut script = Self::reply(tokens);
        script.events.pop();
        script.stall = true;
        script
    }

    /// Fail immediately with a transport error.
    pub fn fail(message: &str) -> Self {
        Self {
            events: vec![Err(LlmError::Provider {
                message: message.to_string(),
            })],
            stall: false,
        }
    }

    pub fn events(events: Vec<Result<StreamEvent, LlmError>>) -> Self {
        Self {
            events,
            stall: false,
        }
    }
}

/// Provider that replays scripts in order and records every request.
pub struct ScriptedProvider {
    scripts: Mutex<VecDeque<Script>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn new(scripts: Vec<Script>) -> (Self, Arc<Mutex<Vec<CompletionRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let provider = Self {
            scripts: Mutex::new(scripts.into()),
            requests: Arc::clone(&requests),
        };
        (provider, requests)
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn stream(&self, request: CompletionRequest) -> EventStream {
        self.requests.lock().unwrap().push(request);
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Script::reply(&["ok"]));

        let head = futures_util::stream::iter(script.events);
        if script.stall {
            Box::pin(head.chain(futures_util::stream::pending()))
        } else {
            Box::pin(head)
        }
    }
}

/// Sink that remembers everything it was told.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub begins: usize,
    pub tokens: Vec<String>,
    pub ends: usize,
    pub failures: Vec<String>,
}

impl TokenSink for RecordingSink {
    fn begin_response(&mut self) {
        self.begins += 1;
    }

    fn write_token(&mut self, token: &str) {
        self.tokens.push(token.to_string());
    }

    fn end_response(&mut self) {
        self.ends += 1;
    }

    fn show_failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}

/// Input that replays canned events, then reports end of input.
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
    pub reads: usize,
}

impl ScriptedInput {
    pub fn lines(lines: &[&str]) -> Self {
        Self::new(
            lines
                .iter()
                .map(|l| InputEvent::Line((*l).to_string()))
                .collect(),
        )
    }

    pub fn new(events: Vec<InputEvent>) -> Self {
        Self {
            events: events.into(),
            reads: 0,
        }
    }
}

impl InputSource for ScriptedInput {
    async fn read_line(&mut self) -> InputEvent {
        self.reads += 1;
        self.events.pop_front().unwrap_or(InputEvent::Eof)
    }
}

pub fn test_config() -> SessionConfig {
    SessionConfig {
        max_history: 4,
        timeout_secs: 5,
        ..Default::default()
    }
}

pub fn test_client(
    config: SessionConfig,
    scripts: Vec<Script>,
) -> (ConversationClient, Arc<Mutex<Vec<CompletionRequest>>>) {
    let (provider, requests) = ScriptedProvider::new(scripts);
    let client = ConversationClient::with_system_prompt(
        BoxLlmProvider::new(provider),
        config,
        TEST_SYSTEM_PROMPT.to_string(),
    );
    (client, requests)
}
