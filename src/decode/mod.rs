//! Source decoding.
//!
//! Turns a [`Source`] into either a table or a block of text for the
//! extractors. Decoding failures are reported as
//! [`EngineError::SourceRead`] so the batch can skip the source and carry on.

mod delimited;
mod document;

use std::borrow::Cow;

use crate::error::{EngineError, EngineResult};
use crate::models::{Source, SourceContent, SourceKind, Table};

pub use delimited::read_csv;
pub use document::read_document_text;

/// A source's payload, ready for extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<'a> {
    /// Rows for the tabular extractor.
    Table(Cow<'a, Table>),
    /// Text for the free-text extractor.
    Text(Cow<'a, str>),
}

/// Decodes a source according to its kind and content.
///
/// Already-decoded content is borrowed rather than copied. Spreadsheet
/// bytes are not decoded here; spreadsheet sources must arrive as tables.
///
/// # Example
///
/// ```
/// use hours_engine::decode::{decode_source, Decoded};
/// use hours_engine::models::Source;
///
/// let source = Source::from_csv("week_1.csv", "Job,Straight\n1152,40\n");
/// match decode_source(&source).unwrap() {
///     Decoded::Table(table) => assert_eq!(table.rows.len(), 1),
///     Decoded::Text(_) => unreachable!(),
/// }
/// ```
pub fn decode_source(source: &Source) -> EngineResult<Decoded<'_>> {
    match (&source.content, source.kind) {
        (SourceContent::Table(table), _) => Ok(Decoded::Table(Cow::Borrowed(table))),
        (SourceContent::Text(text), SourceKind::TextDocument) => {
            Ok(Decoded::Text(Cow::Borrowed(text.as_str())))
        }
        (SourceContent::Text(text), SourceKind::Csv) => {
            read_csv(&source.name, text.as_bytes()).map(|table| Decoded::Table(Cow::Owned(table)))
        }
        (SourceContent::Bytes(bytes), SourceKind::Csv) => {
            read_csv(&source.name, bytes).map(|table| Decoded::Table(Cow::Owned(table)))
        }
        (SourceContent::Bytes(bytes), SourceKind::TextDocument) => {
            read_document_text(&source.name, bytes).map(|text| Decoded::Text(Cow::Owned(text)))
        }
        (SourceContent::Text(_) | SourceContent::Bytes(_), SourceKind::Spreadsheet) => {
            Err(EngineError::SourceRead {
                source_name: source.name.clone(),
                message: "spreadsheet sources must be supplied as decoded rows".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_content_is_borrowed() {
        let source = Source::from_table("week_1.xlsx", Table::new(["Job"]));
        match decode_source(&source).unwrap() {
            Decoded::Table(Cow::Borrowed(table)) => assert_eq!(table.headers, vec!["Job"]),
            other => panic!("Expected borrowed table, got {:?}", other),
        }
    }

    #[test]
    fn test_document_text_is_borrowed() {
        let source = Source::from_text("week_1.pdf", "40 5 1152");
        assert_eq!(
            decode_source(&source).unwrap(),
            Decoded::Text(Cow::Borrowed("40 5 1152"))
        );
    }

    #[test]
    fn test_csv_bytes_are_parsed() {
        let source = Source::from_bytes("week_2.csv", b"Job,Overtime\n1152,2\n".to_vec()).unwrap();
        match decode_source(&source).unwrap() {
            Decoded::Table(table) => {
                assert_eq!(table.headers, vec!["Job", "Overtime"]);
                assert_eq!(table.rows.len(), 1);
            }
            other => panic!("Expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_text_document_bytes_are_read() {
        let source = Source::from_bytes("week_2.txt", b"40 5 1152".to_vec()).unwrap();
        assert_eq!(
            decode_source(&source).unwrap(),
            Decoded::Text(Cow::Owned("40 5 1152".to_string()))
        );
    }

    #[test]
    fn test_spreadsheet_bytes_are_rejected() {
        let source = Source::from_bytes("week_1.xlsx", vec![0x50, 0x4b, 0x03, 0x04]).unwrap();
        match decode_source(&source) {
            Err(EngineError::SourceRead { source_name, .. }) => {
                assert_eq!(source_name, "week_1.xlsx");
            }
            other => panic!("Expected SourceRead error, got {:?}", other),
        }
    }
}
