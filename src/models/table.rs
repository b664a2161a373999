//! Tabular source data.
//!
//! A [`Table`] is the already-decoded form of a CSV or spreadsheet source:
//! a header row plus loosely typed [`Cell`]s.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single raw value from a tabular source.
///
/// Cells are deserialized untagged, so JSON `null`, strings and numbers map
/// directly onto the variants. Non-negative JSON integers land in
/// [`Cell::Integer`] and keep every digit; a job code above `u64::MAX` must
/// be sent as a string.
///
/// # Example
///
/// ```
/// use hours_engine::models::Cell;
///
/// assert_eq!(Cell::from(1152.0).as_text(), Some("1152".to_string()));
/// assert_eq!(Cell::from("  A-17 ").as_text(), Some("A-17".to_string()));
/// assert_eq!(Cell::Empty.as_text(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A missing value.
    #[default]
    Empty,
    /// A textual value, as read from the source.
    Text(String),
    /// A whole number, such as a job code typed as a number.
    Integer(u64),
    /// A numeric value supplied by a typed decoder.
    Number(f64),
}

impl Cell {
    /// Returns the trimmed textual form of the cell, or `None` when blank.
    ///
    /// Whole numbers are rendered without a fractional part so a job code
    /// typed as a number reads back as `"1152"` rather than `"1152.0"`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Cell::Integer(value) => Some(value.to_string()),
            Cell::Number(value) if !value.is_finite() => None,
            Cell::Number(value) => Some(value.to_string()),
        }
    }

    /// Returns true if the cell holds no usable content.
    pub fn is_blank(&self) -> bool {
        self.as_text().is_none()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Integer(value)
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Cell::Text(value.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

/// A decoded table: one header row and any number of data rows.
///
/// Rows may be shorter or longer than the header; missing trailing cells
/// read as [`Cell::Empty`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Column labels as they appeared in the source.
    pub headers: Vec<String>,
    /// Data rows in source order.
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a data row.
    pub fn push_row<I, C>(&mut self, row: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Returns the cell at `row`/`column`, if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Renders the table as plain text, one space-separated line per row,
    /// header line first. Blank cells are omitted.
    ///
    /// Used to push a table without a recognizable job column through the
    /// free-text extractor.
    pub fn to_text(&self) -> String {
        let header = self.headers.join(" ");
        let body = self.rows.iter().map(|row| {
            row.iter()
                .filter_map(Cell::as_text)
                .collect::<Vec<_>>()
                .join(" ")
        });

        std::iter::once(header)
            .chain(body)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
