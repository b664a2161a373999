//! Uploaded sources and the per-source results of a batch.

use serde::{Deserialize, Serialize};

use super::Table;

/// The declared format of an uploaded source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Comma-separated values.
    Csv,
    /// A spreadsheet export (`xlsx`/`xls`), supplied as decoded rows.
    Spreadsheet,
    /// A paginated document (PDF) or plain text extract.
    TextDocument,
}

impl SourceKind {
    /// Infers the kind from a filename extension, case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use hours_engine::models::SourceKind;
    ///
    /// assert_eq!(SourceKind::from_filename("Week_2.PDF"), Some(SourceKind::TextDocument));
    /// assert_eq!(SourceKind::from_filename("summary.xlsx"), Some(SourceKind::Spreadsheet));
    /// assert_eq!(SourceKind::from_filename("notes"), None);
    /// ```
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(SourceKind::Csv),
            "xlsx" | "xls" => Some(SourceKind::Spreadsheet),
            "pdf" | "txt" => Some(SourceKind::TextDocument),
            _ => None,
        }
    }
}

/// The payload of a source, in whatever form the caller has it.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceContent {
    /// Rows already decoded by the caller.
    Table(Table),
    /// Raw text: CSV text for [`SourceKind::Csv`], extracted page text for
    /// [`SourceKind::TextDocument`].
    Text(String),
    /// Undecoded file bytes.
    Bytes(Vec<u8>),
}

/// One uploaded artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// The uploaded filename; also used to detect the week.
    pub name: String,
    /// The declared format.
    pub kind: SourceKind,
    /// The payload.
    pub content: SourceContent,
}

impl Source {
    /// Creates a source with an explicit kind.
    pub fn new(name: impl Into<String>, kind: SourceKind, content: SourceContent) -> Self {
        Self {
            name: name.into(),
            kind,
            content,
        }
    }

    /// Creates a source from decoded rows. The kind is taken from the
    /// filename, defaulting to a spreadsheet.
    pub fn from_table(name: impl Into<String>, table: Table) -> Self {
        let name = name.into();
        let kind = SourceKind::from_filename(&name).unwrap_or(SourceKind::Spreadsheet);
        Self::new(name, kind, SourceContent::Table(table))
    }

    /// Creates a text-document source from already extracted text.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, SourceKind::TextDocument, SourceContent::Text(text.into()))
    }

    /// Creates a CSV source from raw CSV text.
    pub fn from_csv(name: impl Into<String>, csv: impl Into<String>) -> Self {
        Self::new(name, SourceKind::Csv, SourceContent::Text(csv.into()))
    }

    /// Creates a source from undecoded bytes, inferring the kind from the
    /// filename. Returns `None` for an unrecognized extension.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let name = name.into();
        let kind = SourceKind::from_filename(&name)?;
        Some(Self::new(name, kind, SourceContent::Bytes(bytes)))
    }
}

/// How a source's week index was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekAssignment {
    /// Parsed from a `week N` marker in the filename.
    Filename,
    /// The source's 1-based position in the upload.
    UploadOrder,
}

/// Which extractor produced a source's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Header-driven row extraction.
    Tabular,
    /// Line-by-line heuristic extraction.
    Text,
}

/// A recoverable, source-level problem reported alongside the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceWarning {
    /// The source's filename.
    pub source: String,
    /// Human-readable reason.
    pub reason: String,
}

/// What happened to one source during a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    /// The source's filename.
    pub name: String,
    /// The declared format.
    pub kind: SourceKind,
    /// The week the source was assigned to.
    pub week_index: u32,
    /// How the week was decided.
    pub week_assignment: WeekAssignment,
    /// The extractor used, or `None` when the source could not be read.
    pub mode: Option<ExtractionMode>,
    /// Number of records emitted.
    pub records: usize,
    /// Number of rows or lines that produced no record.
    pub skipped: usize,
}
