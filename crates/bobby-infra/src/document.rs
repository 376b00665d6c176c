//! PDF document context.
//!
//! Extracts the text of a PDF once at startup so it can be injected into
//! the system prompt. Extraction problems are logged and treated as "no
//! document", never as a fatal error.

use std::path::Path;

use tracing::{error, info, warn};

/// Extract the text of every page of `path`, concatenated in page order.
///
/// Returns `None` when the file cannot be read or parsed, or when it
/// contains no extractable text.
pub async fn load_document_context(path: &Path) -> Option<String> {
    let owned = path.to_path_buf();
    // pdf-extract is synchronous and may panic on malformed input; both are
    // contained on the blocking pool.
    let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned)).await;

    match result {
        Ok(Ok(text)) if !text.trim().is_empty() => {
            info!(
                path = %path.display(),
                chars = text.len(),
                "PDF content successfully extracted"
            );
            Some(text)
        }
        Ok(Ok(_)) => {
            warn!(path = %path.display(), "PDF contains no extractable text");
            None
        }
        Ok(Err(err)) => {
            error!(path = %path.display(), error = %err, "Error extracting PDF content");
            None
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "PDF extraction task failed");
            None
        }
    }
}
