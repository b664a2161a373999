//! Request types for the hours engine API.
//!
//! This module defines the JSON request structures for the `/summarize` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Source, SourceContent, SourceKind, Table};

use super::response::ApiError;

/// Request body for the `/summarize` endpoint.
///
/// Carries the uploaded sources in upload order, plus optional per-request
/// overrides of the server's rounding increment and week count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// The uploaded sources, in upload order.
    pub sources: Vec<SourceRequest>,
    /// Overrides the configured rounding increment.
    #[serde(default)]
    pub rounding_increment: Option<Decimal>,
    /// Overrides the configured week count.
    #[serde(default)]
    pub week_count: Option<u32>,
}

/// One uploaded source in a summarize request.
///
/// Exactly one of `table`, `text` or `csv` must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRequest {
    /// The uploaded filename.
    pub name: String,
    /// The declared format; inferred from the payload or filename if absent.
    #[serde(default)]
    pub kind: Option<SourceKind>,
    /// Rows decoded by the client.
    #[serde(default)]
    pub table: Option<Table>,
    /// Text extracted by the client from a document.
    #[serde(default)]
    pub text: Option<String>,
    /// Raw CSV text.
    #[serde(default)]
    pub csv: Option<String>,
}

impl SourceRequest {
    /// Converts the request into a [`Source`], checking that exactly one
    /// payload was supplied.
    pub fn into_source(self) -> Result<Source, ApiError> {
        let inferred = SourceKind::from_filename(&self.name);
        let (default_kind, content) = match (self.table, self.text, self.csv) {
            (Some(table), None, None) => (
                inferred.unwrap_or(SourceKind::Spreadsheet),
                SourceContent::Table(table),
            ),
            (None, Some(text), None) => (SourceKind::TextDocument, SourceContent::Text(text)),
            (None, None, Some(csv)) => (SourceKind::Csv, SourceContent::Text(csv)),
            (None, None, None) => {
                return Err(ApiError::with_details(
                    "INVALID_SOURCE",
                    format!("Source '{}' has no content", self.name),
                    "Provide one of 'table', 'text' or 'csv'",
                ));
            }
            _ => {
                return Err(ApiError::with_details(
                    "INVALID_SOURCE",
                    format!("Source '{}' has more than one payload", self.name),
                    "Provide exactly one of 'table', 'text' or 'csv'",
                ));
            }
        };

        Ok(Source::new(
            self.name,
            self.kind.unwrap_or(default_kind),
            content,
        ))
    }
}
