//! Tabular extraction.
//!
//! Reads rows from a decoded table using the normalized header map. A row
//! is dropped only when it has no job id (or, if configured, when both hour
//! values round to zero); unreadable hour cells count as zero.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{EngineConfig, RoundingIncrement};
use crate::models::{Cell, ExtractionMode, HourRecord, Table};

use super::columns::{ColumnMap, normalize_headers};
use super::extraction::Extraction;
use super::rounding::{coerce_hours, round_decimal};
use super::text::extract_text;

/// Extracts records from a decoded table for one week.
///
/// A table without a recognizable job column is rendered to text and run
/// through [`extract_text`] instead.
///
/// # Example
///
/// ```
/// use hours_engine::config::EngineConfig;
/// use hours_engine::ingestion::extract_table;
/// use hours_engine::models::{Cell, Table};
/// use rust_decimal::Decimal;
///
/// let mut table = Table::new(["Job Number", "Regular", "Overtime"]);
/// table.push_row([Cell::from("1152"), Cell::from("40.1"), Cell::from("n/a")]);
///
/// let extraction = extract_table(&table, 1, &EngineConfig::default());
/// let record = &extraction.records[0];
/// assert_eq!(record.straight_hours(), Decimal::new(40, 0));
/// assert_eq!(record.overtime_hours(), Decimal::ZERO);
/// ```
pub fn extract_table(table: &Table, week_index: u32, config: &EngineConfig) -> Extraction {
    let columns = normalize_headers(&table.headers);
    if !columns.has_job_column() {
        debug!(
            week_index,
            headers = ?table.headers,
            "No job column found, falling back to text extraction"
        );
        return extract_text(&table.to_text(), week_index, config);
    }

    let mut extraction = Extraction::new(ExtractionMode::Tabular);
    for (row_number, row) in table.rows.iter().enumerate() {
        extraction.push(extract_row(row, row_number, &columns, week_index, config));
    }

    debug!(
        week_index,
        records = extraction.records.len(),
        skipped = extraction.skipped,
        "Tabular extraction finished"
    );

    extraction
}

fn extract_row(
    row: &[Cell],
    row_number: usize,
    columns: &ColumnMap,
    week_index: u32,
    config: &EngineConfig,
) -> Option<HourRecord> {
    let Some(job_id) = cell_at(row, columns.job_id).and_then(Cell::as_text) else {
        debug!(row_number, "Dropped row without job id");
        return None;
    };

    let increment = config.rounding_increment;
    let straight_hours = hour_cell(cell_at(row, columns.straight_hours), increment);
    let overtime_hours = hour_cell(cell_at(row, columns.overtime_hours), increment);

    if config.drop_zero_rows && straight_hours.is_zero() && overtime_hours.is_zero() {
        debug!(row_number, job_id = %job_id, "Dropped zero-hour row");
        return None;
    }

    match HourRecord::new(job_id, week_index, straight_hours, overtime_hours) {
        Ok(record) => Some(record),
        Err(err) => {
            debug!(row_number, error = %err, "Dropped row");
            None
        }
    }
}

fn cell_at(row: &[Cell], column: Option<usize>) -> Option<&Cell> {
    column.and_then(|index| row.get(index))
}

/// Missing, unreadable and negative cells all read as zero hours.
fn hour_cell(cell: Option<&Cell>, increment: RoundingIncrement) -> Decimal {
    cell.and_then(coerce_hours)
        .filter(|hours| !hours.is_sign_negative())
        .map(|hours| round_decimal(hours, increment))
        .unwrap_or(Decimal::ZERO)
}
