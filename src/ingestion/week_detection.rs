//! Week assignment for uploaded sources.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::WeekAssignment;

static WEEK_IN_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)week[_\s]?(\d+)").expect("week pattern is valid"));

/// Determines the week index of a source.
///
/// A `week N`, `week_N` or `weekN` marker in the filename (any case) wins;
/// otherwise the source's zero-based upload `position` plus one is used. A
/// marker of week 0 or one too large to represent is ignored.
///
/// # Example
///
/// ```
/// use hours_engine::ingestion::detect_week;
/// use hours_engine::models::WeekAssignment;
///
/// assert_eq!(detect_week("Job Summary WEEK_2.pdf", 0), (2, WeekAssignment::Filename));
/// assert_eq!(detect_week("summary.csv", 2), (3, WeekAssignment::UploadOrder));
/// ```
pub fn detect_week(filename: &str, position: usize) -> (u32, WeekAssignment) {
    let from_name = WEEK_IN_FILENAME
        .captures(filename)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .filter(|week| *week > 0);

    match from_name {
        Some(week) => (week, WeekAssignment::Filename),
        None => (upload_week(position), WeekAssignment::UploadOrder),
    }
}

fn upload_week(position: usize) -> u32 {
    u32::try_from(position)
        .ok()
        .and_then(|position| position.checked_add(1))
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_variants() {
        assert_eq!(detect_week("week1.csv", 4), (1, WeekAssignment::Filename));
        assert_eq!(detect_week("Week 3.xlsx", 0), (3, WeekAssignment::Filename));
        assert_eq!(detect_week("hours_week_12.pdf", 0), (12, WeekAssignment::Filename));
    }

    #[test]
    fn test_upload_order_is_one_based() {
        assert_eq!(detect_week("a.csv", 0), (1, WeekAssignment::UploadOrder));
        assert_eq!(detect_week("b.csv", 1), (2, WeekAssignment::UploadOrder));
    }

    #[test]
    fn test_week_zero_falls_back_to_upload_order() {
        assert_eq!(detect_week("week0.csv", 1), (2, WeekAssignment::UploadOrder));
    }

    #[test]
    fn test_separator_other_than_space_or_underscore_is_not_matched() {
        assert_eq!(detect_week("week-2.csv", 0), (1, WeekAssignment::UploadOrder));
    }

    #[test]
    fn test_oversized_week_number_falls_back() {
        assert_eq!(
            detect_week("week99999999999.csv", 0),
            (1, WeekAssignment::UploadOrder)
        );
    }
}
