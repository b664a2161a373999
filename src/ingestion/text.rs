//! Free-text extraction.
//!
//! Splits extracted page text into lines and runs each through the
//! heuristic chain. Lines that match nothing (headers, footers, page
//! numbers) are skipped without error.

use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{ExtractionMode, HourRecord};

use super::extraction::Extraction;
use super::heuristics::match_line;
use super::rounding::round_decimal;

/// Extracts records from unstructured text for one week.
///
/// # Example
///
/// ```
/// use hours_engine::config::EngineConfig;
/// use hours_engine::ingestion::extract_text;
///
/// let text = "Weekly Summary\n40.00 5.50 ... 1152\n\nPage 1 of 1\n";
/// let extraction = extract_text(text, 1, &EngineConfig::default());
///
/// assert_eq!(extraction.records.len(), 1);
/// assert_eq!(extraction.records[0].job_id(), "1152");
/// assert_eq!(extraction.skipped, 2);
/// ```
pub fn extract_text(text: &str, week_index: u32, config: &EngineConfig) -> Extraction {
    let mut extraction = Extraction::new(ExtractionMode::Text);

    let lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    for (line_number, line) in lines.enumerate() {
        extraction.push(extract_line(line, line_number, week_index, config));
    }

    debug!(
        week_index,
        records = extraction.records.len(),
        skipped = extraction.skipped,
        "Text extraction finished"
    );

    extraction
}

fn extract_line(
    line: &str,
    line_number: usize,
    week_index: u32,
    config: &EngineConfig,
) -> Option<HourRecord> {
    let Some((heuristic, found)) = match_line(line, &config.text_layout) else {
        debug!(line_number, line, "No heuristic matched line");
        return None;
    };

    let increment = config.rounding_increment;
    let record = HourRecord::new(
        found.job_id,
        week_index,
        round_decimal(found.straight_hours, increment),
        round_decimal(found.overtime_hours, increment),
    );

    match record {
        Ok(record) => {
            debug!(
                line_number,
                heuristic = heuristic.name(),
                job_id = record.job_id(),
                "Matched line"
            );
            Some(record)
        }
        Err(err) => {
            debug!(line_number, error = %err, "Dropped line");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HourOrder, JobPosition, RoundingIncrement, TextLayout};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_report_lines_are_extracted_in_order() {
        let text = "\
            JOB SUMMARY REPORT\n\
            Straight Overtime Total Job\n\
            40.00 5.50 45.50 1152\n\
            Crew B 32.00 0.00 32.00 1200\n\
            1310: 8.00 1.00\n\
            Page 1 of 1\n";

        let extraction = extract_text(text, 2, &EngineConfig::default());

        let jobs: Vec<&str> = extraction.records.iter().map(|r| r.job_id()).collect();
        assert_eq!(jobs, vec!["1152", "1200", "1310"]);
        assert!(extraction.records.iter().all(|r| r.week_index() == 2));
        assert_eq!(extraction.skipped, 3);
        assert_eq!(extraction.mode, ExtractionMode::Text);
    }

    #[test]
    fn test_values_are_rounded() {
        let config = EngineConfig {
            rounding_increment: RoundingIncrement::Half,
            ..EngineConfig::default()
        };
        let extraction = extract_text("7.30 1.20 1152", 1, &config);

        let record = &extraction.records[0];
        assert_eq!(record.straight_hours(), dec("7.5"));
        assert_eq!(record.overtime_hours(), dec("1.0"));
    }

    #[test]
    fn test_configured_order_applies_to_every_line() {
        let config = EngineConfig {
            text_layout: TextLayout {
                job_position: JobPosition::Auto,
                hour_order: HourOrder::OvertimeFirst,
            },
            ..EngineConfig::default()
        };
        let text = "5.50 40.00 1152\nCrew 2.00 38.00 40.00 1200\n";
        let extraction = extract_text(text, 1, &config);

        assert_eq!(extraction.records.len(), 2);
        for record in &extraction.records {
            assert!(record.straight_hours() > record.overtime_hours());
        }
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let extraction = extract_text("   \n\n", 1, &EngineConfig::default());
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.skipped, 0);
    }

    #[test]
    fn test_blank_lines_are_not_counted_as_skipped() {
        let extraction = extract_text("\n40 5 1152\n\n\n", 1, &EngineConfig::default());
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.skipped, 0);
    }
}
