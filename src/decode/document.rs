//! Text extraction for paginated documents.

use lopdf::Document;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// How far into the buffer the PDF header may appear.
const PDF_HEADER_WINDOW: usize = 1024;

/// Returns the text of a document source.
///
/// PDF bytes are parsed with `lopdf` and the text of every page is joined
/// in page order, one newline after each page. Anything else must be valid
/// UTF-8 and is returned as-is, for plain-text extracts.
///
/// # Example
///
/// ```
/// use hours_engine::decode::read_document_text;
///
/// let text = read_document_text("week_1.txt", b"40.00 5.50 1152\n").unwrap();
/// assert_eq!(text, "40.00 5.50 1152\n");
/// assert!(read_document_text("week_1.pdf", b"%PDF-1.7 truncated").is_err());
/// ```
pub fn read_document_text(source_name: &str, bytes: &[u8]) -> EngineResult<String> {
    let read_error = |message: String| EngineError::SourceRead {
        source_name: source_name.to_string(),
        message,
    };

    if !is_pdf(bytes) {
        return std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| read_error("not a PDF document or UTF-8 text".to_string()));
    }

    let document = Document::load_mem(bytes).map_err(|e| read_error(e.to_string()))?;

    let mut text = String::new();
    for page_number in document.get_pages().into_keys() {
        let content = document
            .extract_text(&[page_number])
            .map_err(|e| read_error(format!("page {}: {}", page_number, e)))?;
        if !content.is_empty() {
            text.push_str(&content);
            text.push('\n');
        }
    }

    debug!(
        source = source_name,
        bytes = bytes.len(),
        chars = text.len(),
        "Extracted document text"
    );

    Ok(text)
}

fn is_pdf(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(PDF_HEADER_WINDOW)];
    window
        .windows(PDF_MAGIC.len())
        .any(|candidate| candidate == PDF_MAGIC)
}
