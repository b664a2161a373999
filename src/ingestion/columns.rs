//! Header normalization.
//!
//! Maps the header variants seen in exported reports onto the three fields
//! the engine cares about. Matching is case-insensitive and ignores
//! surrounding and repeated whitespace; unrecognized columns are ignored.

use serde::Serialize;

/// A field the engine reads from a tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    /// The job identifier.
    JobId,
    /// Regular hours.
    StraightHours,
    /// Overtime hours.
    OvertimeHours,
}

/// Resolves a single header label to its canonical field.
///
/// # Example
///
/// ```
/// use hours_engine::ingestion::{canonical_field, CanonicalField};
///
/// assert_eq!(canonical_field("  Job   Number "), Some(CanonicalField::JobId));
/// assert_eq!(canonical_field("REGULAR"), Some(CanonicalField::StraightHours));
/// assert_eq!(canonical_field("Cost Code"), None);
/// ```
pub fn canonical_field(header: &str) -> Option<CanonicalField> {
    let label = header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match label.as_str() {
        "job number" | "job" | "job_id" => Some(CanonicalField::JobId),
        "regular" | "straight" | "straight_hours" => Some(CanonicalField::StraightHours),
        "overtime" | "overtime_hours" => Some(CanonicalField::OvertimeHours),
        _ => None,
    }
}

/// Column positions of the canonical fields within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnMap {
    /// Position of the job identifier column.
    pub job_id: Option<usize>,
    /// Position of the straight hours column.
    pub straight_hours: Option<usize>,
    /// Position of the overtime hours column.
    pub overtime_hours: Option<usize>,
}

impl ColumnMap {
    /// Returns true if the source can be read as a table.
    ///
    /// Without a job column the source has to go through free-text
    /// extraction instead.
    pub fn has_job_column(&self) -> bool {
        self.job_id.is_some()
    }

    fn slot(&mut self, field: CanonicalField) -> &mut Option<usize> {
        match field {
            CanonicalField::JobId => &mut self.job_id,
            CanonicalField::StraightHours => &mut self.straight_hours,
            CanonicalField::OvertimeHours => &mut self.overtime_hours,
        }
    }
}

/// Builds a [`ColumnMap`] for a header row. When two columns resolve to the
/// same field, the leftmost one is used.
///
/// # Example
///
/// ```
/// use hours_engine::ingestion::normalize_headers;
///
/// let columns = normalize_headers(&["Crew", "Regular", "Overtime", "Job Number"]);
/// assert_eq!(columns.job_id, Some(3));
/// assert_eq!(columns.straight_hours, Some(1));
/// assert_eq!(columns.overtime_hours, Some(2));
/// ```
pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> ColumnMap {
    let mut columns = ColumnMap::default();
    for (index, header) in headers.iter().enumerate() {
        if let Some(field) = canonical_field(header.as_ref()) {
            columns.slot(field).get_or_insert(index);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_synonyms_are_recognized() {
        assert_eq!(canonical_field("Job Number"), Some(CanonicalField::JobId));
        assert_eq!(canonical_field("job"), Some(CanonicalField::JobId));
        assert_eq!(canonical_field("Regular"), Some(CanonicalField::StraightHours));
        assert_eq!(canonical_field("STRAIGHT"), Some(CanonicalField::StraightHours));
        assert_eq!(canonical_field("Overtime"), Some(CanonicalField::OvertimeHours));
    }

    #[test]
    fn test_canonical_names_are_recognized() {
        assert_eq!(canonical_field("job_id"), Some(CanonicalField::JobId));
        assert_eq!(
            canonical_field("straight_hours"),
            Some(CanonicalField::StraightHours)
        );
        assert_eq!(
            canonical_field("overtime_hours"),
            Some(CanonicalField::OvertimeHours)
        );
    }

    #[test]
    fn test_partial_labels_do_not_match() {
        assert_eq!(canonical_field("Job Description"), None);
        assert_eq!(canonical_field("OT"), None);
        assert_eq!(canonical_field(""), None);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let columns = normalize_headers(&["Date", "Job", "Notes", "Straight"]);
        assert_eq!(columns.job_id, Some(1));
        assert_eq!(columns.straight_hours, Some(3));
        assert_eq!(columns.overtime_hours, None);
    }

    #[test]
    fn test_first_duplicate_column_wins() {
        let columns = normalize_headers(&["Job", "Job Number", "Regular", "Straight"]);
        assert_eq!(columns.job_id, Some(0));
        assert_eq!(columns.straight_hours, Some(2));
    }

    #[test]
    fn test_missing_job_column_is_reported() {
        let columns = normalize_headers(&["Regular", "Overtime"]);
        assert!(!columns.has_job_column());
    }
}
