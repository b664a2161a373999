//! The result of running an extractor over one source.

use crate::models::{ExtractionMode, HourRecord};

/// Records read from a single source, with a count of what was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The extractor that produced the records.
    pub mode: ExtractionMode,
    /// Validated, rounded records in source order.
    pub records: Vec<HourRecord>,
    /// Rows or lines that produced no record.
    pub skipped: usize,
}

impl Extraction {
    pub(crate) fn new(mode: ExtractionMode) -> Self {
        Self {
            mode,
            records: Vec::new(),
            skipped: 0,
        }
    }

    pub(crate) fn push(&mut self, record: Option<HourRecord>) {
        match record {
            Some(record) => self.records.push(record),
            None => self.skipped += 1,
        }
    }
}
