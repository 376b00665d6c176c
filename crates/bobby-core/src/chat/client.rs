//! Conversation client for Bobby.
//!
//! `ConversationClient` turns a trimmed history into a `CompletionRequest`,
//! streams the reply through a `TokenSink`, and bounds the whole exchange
//! with the session timeout. Every failure is converted into the text that
//! becomes the assistant's turn, so callers always get a `String` back.

use std::time::Instant;

use futures_util::StreamExt;
use tracing::{Instrument, Span, debug, error, info_span};

use bobby_types::config::SessionConfig;
use bobby_types::llm::{CompletionRequest, LlmError, Message, StreamEvent};

use crate::llm::box_provider::BoxLlmProvider;

use super::history::trim_history;
use super::prompt::SystemPromptBuilder;
use super::sink::TokenSink;

/// Reply used when a turn exceeds the session timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";

/// Why a turn produced no model reply.
///
/// `Display` is exactly the text stored as the assistant's message.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Error: {0}")]
    Llm(#[from] LlmError),
}

/// Executes single request/response exchanges against a chat model.
///
/// Owns the session configuration and the system prompt, both fixed at
/// construction.
#[derive(Debug)]
pub struct ConversationClient {
    provider: BoxLlmProvider,
    config: SessionConfig,
    system_prompt: String,
    prefix: Vec<Message>,
    span: Span,
}

impl ConversationClient {
    /// Create a client whose system prompt is rendered for today's date.
    ///
    /// `document` is the extracted text of the configured document, if any.
    pub fn new(provider: BoxLlmProvider, config: SessionConfig, document: Option<&str>) -> Self {
        let today = chrono::Local::now().date_naive();
        let system_prompt = SystemPromptBuilder::build(&config.persona, today, document);
        Self::with_system_prompt(provider, config, system_prompt)
    }

    /// Create a client with a pre-rendered system prompt.
    pub fn with_system_prompt(
        provider: BoxLlmProvider,
        config: SessionConfig,
        system_prompt: String,
    ) -> Self {
        let mut prefix = Vec::with_capacity(1 + config.examples.len() * 2);
        prefix.push(Message::system(system_prompt.clone()));
        prefix.extend(SystemPromptBuilder::few_shot_messages(&config.examples));

        Self {
            provider,
            config,
            system_prompt,
            prefix,
            span: Span::none(),
        }
    }

    /// Attach the span every turn's logs and request spans nest under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Build the request payload: system message, few-shot examples, then
    /// the already-trimmed history.
    pub fn build_request(&self, trimmed_history: &[Message]) -> CompletionRequest {
        let mut messages = Vec::with_capacity(self.prefix.len() + trimmed_history.len());
        messages.extend_from_slice(&self.prefix);
        messages.extend_from_slice(trimmed_history);

        CompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            stream: true,
        }
    }

    /// Trim `history` to the configured window and build the request.
    pub fn request_for(&self, history: &[Message]) -> CompletionRequest {
        self.build_request(trim_history(history, self.config.max_history))
    }

    /// Send the request, stream tokens into `sink`, and return the reply.
    ///
    /// Never fails: a timeout yields [`TIMEOUT_MESSAGE`] (partial output is
    /// discarded) and any other error yields `"Error: {detail}"`.
    pub async fn send_and_stream<S>(&self, request: CompletionRequest, sink: &mut S) -> String
    where
        S: TokenSink + ?Sized,
    {
        match self.try_send_and_stream(request, sink).await {
            Ok(reply) => {
                sink.end_response();
                reply
            }
            Err(err) => {
                let _enter = self.span.enter();
                match &err {
                    TurnError::Timeout => {
                        error!(timeout_secs = self.config.timeout_secs, "Request timed out");
                    }
                    TurnError::Llm(e) => error!(error = %e, "Error during chat"),
                }
                let message = err.to_string();
                sink.show_failure(&message);
                message
            }
        }
    }

    /// Same as [`send_and_stream`](Self::send_and_stream) but keeps the
    /// failure typed.
    pub async fn try_send_and_stream<S>(
        &self,
        request: CompletionRequest,
        sink: &mut S,
    ) -> Result<String, TurnError>
    where
        S: TokenSink + ?Sized,
    {
        let span = info_span!(
            parent: &self.span,
            "gen_ai.chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.messages = request.messages.len(),
        );

        sink.begin_response();
        let exchange = self.stream_reply(request, sink).instrument(span);

        match tokio::time::timeout(self.config.timeout(), exchange).await {
            Ok(result) => result.map_err(TurnError::from),
            Err(_elapsed) => Err(TurnError::Timeout),
        }
    }

    /// Drive the provider stream to completion, forwarding text deltas.
    async fn stream_reply<S>(&self, request: CompletionRequest, sink: &mut S) -> Result<String, LlmError>
    where
        S: TokenSink + ?Sized,
    {
        let started = Instant::now();
        let mut stream = self.provider.stream(request);
        let mut reply = String::new();
        let mut deltas = 0u32;

        while let Some(event) = stream.next().await {
            match event? {
                StreamEvent::Connected => debug!("Stream connected"),
                StreamEvent::TextDelta { text } => {
                    if text.is_empty() {
                        continue;
                    }
                    sink.write_token(&text);
                    reply.push_str(&text);
                    deltas += 1;
                }
                StreamEvent::MessageDelta { stop_reason } => {
                    debug!(gen_ai.response.finish_reason = %stop_reason, "Stop reason received");
                }
                StreamEvent::Usage(usage) => {
                    debug!(
                        gen_ai.usage.input_tokens = usage.input_tokens,
                        gen_ai.usage.output_tokens = usage.output_tokens,
                        "Token usage"
                    );
                }
                StreamEvent::Done => break,
            }
        }

        debug!(
            deltas,
            chars = reply.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Response complete"
        );
        Ok(reply)
    }
}
