//! Output port for streamed responses.

/// Receives a response while it streams in.
///
/// The console implementation prints tokens as they arrive; tests record
/// them. Only [`TokenSink::write_token`] carries model output.
pub trait TokenSink {
    /// A request is about to be sent.
    fn begin_response(&mut self) {}

    /// One piece of response text, in arrival order.
    fn write_token(&mut self, token: &str);

    /// The response completed successfully.
    fn end_response(&mut self);

    /// The turn failed; `message` is what becomes the assistant's reply.
    fn show_failure(&mut self, _message: &str) {}
}
