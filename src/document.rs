//! Plain-text extraction from PDF documents.

use lopdf::Document;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Extract the text of every page in a PDF, each page followed by a newline.
///
/// Pages that fail to extract or yield no text are left out. If the document
/// cannot be opened at all, a diagnostic is logged and an empty string is
/// returned, so callers see the same result for an empty document and an
/// unreadable one.
#[instrument(fields(path = %path.display()))]
pub fn extract_text(path: &Path) -> String {
    let document = match Document::load(path) {
        Ok(document) => document,
        Err(e) => {
            warn!("Error extracting text from {}: {}", path.display(), e);
            return String::new();
        }
    };

    let mut text = String::new();
    let mut extracted = 0usize;

    // BTreeMap keys are page numbers, so iteration follows page order.
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(page_text) if !page_text.is_empty() => {
                text.push_str(&page_text);
                text.push('\n');
                extracted += 1;
            }
            Ok(_) => debug!("Page {} has no extractable text", page_number),
            Err(e) => debug!("Skipping page {}: {}", page_number, e),
        }
    }

    debug!("Extracted text from {} pages ({} chars)", extracted, text.len());
    text
}
