//! CSV decoding.

use csv::{ReaderBuilder, Trim};

use crate::error::{EngineError, EngineResult};
use crate::models::{Cell, Table};

/// Reads CSV bytes into a [`Table`]. The first record is the header row;
/// rows may have any length. Empty fields become [`Cell::Empty`].
///
/// # Example
///
/// ```
/// use hours_engine::decode::read_csv;
///
/// let table = read_csv("week_1.csv", b"Job Number,Regular,Overtime\n1152,40,5.5\n").unwrap();
/// assert_eq!(table.headers, vec!["Job Number", "Regular", "Overtime"]);
/// assert_eq!(table.rows.len(), 1);
/// ```
pub fn read_csv(source_name: &str, bytes: &[u8]) -> EngineResult<Table> {
    let read_error = |message: String| EngineError::SourceRead {
        source_name: source_name.to_string(),
        message,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| read_error(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(read_error("no header row".to_string()));
    }

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record.map_err(|e| read_error(e.to_string()))?;
        table.push_row(record.iter().map(|field| {
            if field.is_empty() {
                Cell::Empty
            } else {
                Cell::from(field)
            }
        }));
    }

    Ok(table)
}
