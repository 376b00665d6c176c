//! OpenAI SSE stream to [`StreamEvent`] adapter.
//!
//! Maps `async-openai`'s [`ChatCompletionResponseStream`] chunks to the
//! provider-agnostic [`StreamEvent`] enum defined in `bobby-types`.

use futures_util::{Stream, StreamExt};
use std::pin::Pin;

use async_openai::types::chat::{
    ChatCompletionResponseStream, CreateChatCompletionStreamResponse, FinishReason,
};

use bobby_types::llm::{LlmError, StopReason, StreamEvent, Usage};

/// Map an async-openai [`ChatCompletionResponseStream`] to a stream of [`StreamEvent`]s.
///
/// The returned stream emits events in this order:
/// 1. `Connected` -- immediately on entry
/// 2. `TextDelta` -- for each non-empty text content chunk
/// 3. `MessageDelta` -- with the stop reason when finish_reason appears
/// 4. `Usage` -- token usage (requires `stream_options.include_usage = true`)
/// 5. `Done` -- at the end of the stream
pub fn map_openai_stream(
    stream: ChatCompletionResponseStream,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
    Box::pin(async_stream::try_stream! {
        yield StreamEvent::Connected;

        let mut stream = stream;
        while let Some(result) = stream.next().await {
            let chunk = result.map_err(|e| LlmError::Stream(e.to_string()))?;
            for event in chunk_events(chunk) {
                yield event;
            }
        }

        yield StreamEvent::Done;
    })
}

/// Events carried by a single stream chunk, in emission order.
fn chunk_events(chunk: CreateChatCompletionStreamResponse) -> Vec<StreamEvent> {
    let mut events = Vec::new();

    for choice in chunk.choices {
        if let Some(text) = choice.delta.content {
            if !text.is_empty() {
                events.push(StreamEvent::TextDelta { text });
            }
        }
        if let Some(finish_reason) = choice.finish_reason {
            events.push(StreamEvent::MessageDelta {
                stop_reason: map_finish_reason(finish_reason),
            });
        }
    }

    // The final chunk carries usage with an empty choices array.
    if let Some(usage) = chunk.usage {
        events.push(StreamEvent::Usage(Usage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        }));
    }

    events
}

fn map_finish_reason(reason: FinishReason) -> StopReason {
    match reason {
        FinishReason::Length => StopReason::MaxTokens,
        FinishReason::ContentFilter => StopReason::ContentFilter,
        FinishReason::Stop | FinishReason::ToolCalls | FinishReason::FunctionCall => {
            StopReason::EndTurn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(json: serde_json::Value) -> CreateChatCompletionStreamResponse {
        serde_json::from_value(json).unwrap()
    }

    fn content_chunk(content: &str) -> CreateChatCompletionStreamResponse {
        chunk(serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "created": 1_700_000_000u32,
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "delta": { "content": content },
                "finish_reason": null
            }]
        }))
    }

    #[test]
    fn test_finish_reason_to_stop_reason_mapping() {
        let cases = vec![
            (FinishReason::Stop, StopReason::EndTurn),
            (FinishReason::Length, StopReason::MaxTokens),
            (FinishReason::ContentFilter, StopReason::ContentFilter),
            (FinishReason::ToolCalls, StopReason::EndTurn),
            (FinishReason::FunctionCall, StopReason::EndTurn),
        ];

        for (finish, expected) in cases {
            assert_eq!(map_finish_reason(finish), expected);
        }
    }

    #[test]
    fn test_content_chunk_yields_text_delta() {
        let events = chunk_events(content_chunk("Hel"));
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], StreamEvent::TextDelta { text } if text == "Hel"));
    }

    #[test]
    fn test_empty_content_is_skipped() {
        assert!(chunk_events(content_chunk("")).is_empty());
    }

    #[test]
    fn test_usage_chunk_yields_usage() {
        let events = chunk_events(chunk(serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion.chunk",
            "created": 1_700_000_000u32,
            "model": "gpt-4o",
            "choices": [],
            "usage": {
                "prompt_tokens": 42,
                "completion_tokens": 7,
                "total_tokens": 49
            }
        })));
        assert_eq!(events.len(), 1);
        match &events[0] {
            StreamEvent::Usage(usage) => {
                assert_eq!(usage.input_tokens, 42);
                assert_eq!(usage.output_tokens, 7);
            }
            other => panic!("expected usage, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_map_openai_stream_orders_events() {
        let chunks = vec![Ok(content_chunk("Hel")), Ok(content_chunk("lo"))];
        let source: ChatCompletionResponseStream = Box::pin(futures_util::stream::iter(chunks));

        let events: Vec<StreamEvent> = map_openai_stream(source)
            .map(|e| e.unwrap())
            .collect()
            .await;

        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], StreamEvent::Connected));
        assert!(matches!(&events[1], StreamEvent::TextDelta { text } if text == "Hel"));
        assert!(matches!(&events[2], StreamEvent::TextDelta { text } if text == "lo"));
        assert!(matches!(events[3], StreamEvent::Done));
    }
}
