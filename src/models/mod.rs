//! Core data models for the hours engine.
//!
//! This module contains all the domain models used throughout the engine.

mod grid;
mod hour_record;
mod source;
mod table;

pub use grid::{BatchOutcome, CanonicalGrid, WeekHours};
pub use hour_record::HourRecord;
pub use source::{
    ExtractionMode, Source, SourceContent, SourceKind, SourceSummary, SourceWarning,
    WeekAssignment,
};
pub use table::{Cell, Table};
