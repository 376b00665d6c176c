//! System prompt builder for Bobby.
//!
//! The system prompt is rendered once per session from the persona, the
//! current date, and the optional document text. It is never stored in the
//! conversation history, so history trimming can never drop it.

use chrono::NaiveDate;

use bobby_types::config::{FewShotExample, Persona};
use bobby_types::llm::Message;

/// Placeholder used when no document context is available.
pub const NO_DOCUMENT_PLACEHOLDER: &str = "No additional document provided.";

/// Builds the system prompt and the fixed few-shot prefix.
///
/// Layout:
/// ```text
/// You are {name}, a virtual assistant created by {creator}. Today is {YYYY-MM-DD}.
/// Refer to the following document for context when answering questions:
/// {document | "No additional document provided."}
/// ```
pub struct SystemPromptBuilder;

impl SystemPromptBuilder {
    /// Render the system prompt text. Pure: same inputs, same output.
    pub fn build(persona: &Persona, today: NaiveDate, document: Option<&str>) -> String {
        let document = document
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_DOCUMENT_PLACEHOLDER);

        format!(
            "You are {}, a virtual assistant created by {}. Today is {}.\n\
            Refer to the following document for context when answering questions:\n\
            {document}",
            persona.name,
            persona.creator,
            today.format("%Y-%m-%d"),
        )
    }

    /// Render few-shot examples as alternating user/assistant messages.
    pub fn few_shot_messages(examples: &[FewShotExample]) -> Vec<Message> {
        examples
            .iter()
            .flat_map(|example| {
                [
                    Message::user(example.input.clone()),
                    Message::assistant(example.output.clone()),
                ]
            })
            .collect()
    }
}
