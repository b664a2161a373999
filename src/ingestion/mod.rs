//! Ingestion and normalization logic for the hours engine.
//!
//! This module contains hour rounding, header normalization, tabular and
//! free-text row extraction with its heuristic chain, week detection,
//! job-week aggregation, and the batch driver that ties them together.

mod aggregator;
mod batch;
mod columns;
mod extraction;
mod heuristics;
mod rounding;
mod tabular;
mod text;
mod week_detection;

pub use aggregator::{Aggregator, aggregate};
pub use batch::process_batch;
pub use columns::{CanonicalField, ColumnMap, canonical_field, normalize_headers};
pub use extraction::Extraction;
pub use heuristics::{Heuristic, LineMatch, match_line};
pub use rounding::{coerce_hours, parse_decimal, round_decimal, round_hours};
pub use tabular::extract_table;
pub use text::extract_text;
pub use week_detection::detect_week;
