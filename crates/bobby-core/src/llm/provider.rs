//! LlmProvider trait definition.
//!
//! This is the core abstraction that all chat-completion backends implement.
//! `stream` returns `Pin<Box<dyn Stream>>` so the trait stays object-safe
//! for the `BoxLlmProvider` wrapper.

use std::pin::Pin;

use futures_util::Stream;

use bobby_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// Boxed stream of provider events, as returned by [`LlmProvider::stream`].
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for chat-completion backends.
///
/// Implementations live in bobby-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a streaming completion request. Returns a stream of events.
    ///
    /// Nothing is sent until the stream is first polled; dropping the
    /// stream abandons the underlying request.
    fn stream(&self, request: CompletionRequest) -> EventStream;
}
