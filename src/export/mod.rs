//! Flat exports of the canonical grid.
//!
//! Presentation layers consume the grid through these helpers: per-week
//! tables (which read back through the tabular extractor unchanged), CSV
//! text, and the tab-separated per-job block used for copy and paste.

use csv::Writer;
use rust_decimal::Decimal;

use crate::config::HourOrder;
use crate::error::{EngineError, EngineResult};
use crate::models::{CanonicalGrid, Cell, Table, WeekHours};

/// Column labels of exported week tables.
pub const EXPORT_HEADERS: [&str; 3] = ["Job Number", "STRAIGHT", "OVERTIME"];

/// The rows of one week, across every job in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekTable {
    /// The 1-based week.
    pub week_index: u32,
    /// One row per job, in presentation order.
    pub table: Table,
}

impl WeekTable {
    /// A filename that carries the week marker, so the table can be
    /// re-uploaded into the same slot.
    pub fn file_name(&self) -> String {
        format!("week_{}.csv", self.week_index)
    }
}

/// Formats hours with two decimal places.
///
/// # Example
///
/// ```
/// use hours_engine::export::format_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_hours(Decimal::new(55, 1)), "5.50");
/// assert_eq!(format_hours(Decimal::ZERO), "0.00");
/// ```
pub fn format_hours(hours: Decimal) -> String {
    format!("{:.2}", hours)
}

/// Splits the grid into one flat table per week.
pub fn week_tables(grid: &CanonicalGrid) -> Vec<WeekTable> {
    (1..=grid.week_count())
        .map(|week_index| {
            let mut table = Table::new(EXPORT_HEADERS);
            for (job_id, weeks) in grid.iter() {
                if let Some(week) = weeks.iter().find(|w| w.week_index == week_index) {
                    table.push_row([
                        Cell::from(job_id),
                        Cell::from(format_hours(week.straight_hours)),
                        Cell::from(format_hours(week.overtime_hours)),
                    ]);
                }
            }
            WeekTable { week_index, table }
        })
        .collect()
}

/// Writes a table as CSV text, header row first.
///
/// # Example
///
/// ```
/// use hours_engine::export::to_csv;
/// use hours_engine::models::Table;
///
/// let mut table = Table::new(["Job Number", "STRAIGHT", "OVERTIME"]);
/// table.push_row(["1152", "40.00", "5.50"]);
/// assert_eq!(to_csv(&table).unwrap(), "Job Number,STRAIGHT,OVERTIME\n1152,40.00,5.50\n");
/// ```
pub fn to_csv(table: &Table) -> EngineResult<String> {
    let export_error = |message: String| EngineError::Export { message };

    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record(&table.headers)
        .map_err(|e| export_error(e.to_string()))?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(|e| export_error(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| export_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| export_error(e.to_string()))
}

/// Renders one job's weeks as tab-separated lines, one per week.
///
/// # Example
///
/// ```
/// use hours_engine::config::HourOrder;
/// use hours_engine::export::clipboard_block;
/// use hours_engine::models::WeekHours;
/// use rust_decimal::Decimal;
///
/// let weeks = [
///     WeekHours { week_index: 1, straight_hours: Decimal::from(40), overtime_hours: Decimal::new(55, 1) },
///     WeekHours::zero(2),
/// ];
/// assert_eq!(clipboard_block(&weeks, HourOrder::OvertimeFirst), "5.50\t40.00\n0.00\t0.00");
/// ```
pub fn clipboard_block(weeks: &[WeekHours], order: HourOrder) -> String {
    weeks
        .iter()
        .map(|week| {
            let (first, second) = order.arrange(week.straight_hours, week.overtime_hours);
            format!("{}\t{}", format_hours(first), format_hours(second))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
