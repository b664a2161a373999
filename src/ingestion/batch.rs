//! Batch processing.
//!
//! Runs one upload batch start to finish: validates the configuration,
//! then decodes, extracts and aggregates each source in upload order. A
//! source that cannot be read is reported as a warning and skipped; the
//! rest of the batch still aggregates.

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::decode::{Decoded, decode_source};
use crate::error::EngineResult;
use crate::models::{BatchOutcome, Source, SourceSummary, SourceWarning};

use super::aggregator::Aggregator;
use super::extraction::Extraction;
use super::tabular::extract_table;
use super::text::extract_text;
use super::week_detection::detect_week;

/// Processes a batch of sources into a [`BatchOutcome`].
///
/// # Returns
///
/// A configuration error (unsupported increment, zero week count) before any
/// source is touched; otherwise the grid plus one warning per failed
/// source and one summary per source.
///
/// # Example
///
/// ```
/// use hours_engine::config::EngineConfig;
/// use hours_engine::ingestion::process_batch;
/// use hours_engine::models::Source;
/// use rust_decimal::Decimal;
///
/// let sources = vec![
///     Source::from_csv("week_1.csv", "Job Number,Regular,Overtime\n1152,40,2\n"),
///     Source::from_text("week_2.pdf", "38.00 0.00 ... 1152\n"),
/// ];
/// let outcome = process_batch(&sources, &EngineConfig::default()).unwrap();
///
/// let weeks = outcome.grid.weeks("1152").unwrap();
/// assert_eq!(weeks[0].straight_hours, Decimal::from(40));
/// assert_eq!(weeks[1].straight_hours, Decimal::from(38));
/// assert!(weeks[2].is_zero());
/// assert!(outcome.warnings.is_empty());
/// ```
pub fn process_batch(sources: &[Source], config: &EngineConfig) -> EngineResult<BatchOutcome> {
    config.validate()?;

    info!(
        sources = sources.len(),
        rounding_increment = %config.rounding_increment,
        week_count = config.week_count,
        "Processing batch"
    );

    let mut aggregator = Aggregator::new(config.week_count, config.duplicate_policy);
    let mut warnings = Vec::new();
    let mut summaries = Vec::with_capacity(sources.len());

    for (position, source) in sources.iter().enumerate() {
        let (week_index, week_assignment) = detect_week(&source.name, position);
        let mut summary = SourceSummary {
            name: source.name.clone(),
            kind: source.kind,
            week_index,
            week_assignment,
            mode: None,
            records: 0,
            skipped: 0,
        };

        let extraction = match decode_source(source) {
            Ok(decoded) => extract(&decoded, week_index, config),
            Err(err) => {
                warn!(source = %source.name, error = %err, "Skipping unreadable source");
                warnings.push(SourceWarning {
                    source: source.name.clone(),
                    reason: err.to_string(),
                });
                summaries.push(summary);
                continue;
            }
        };

        summary.mode = Some(extraction.mode);
        summary.records = extraction.records.len();
        summary.skipped = extraction.skipped;

        if week_index > config.week_count {
            warn!(
                source = %source.name,
                week_index,
                week_count = config.week_count,
                "Source week is outside the configured range"
            );
            warnings.push(SourceWarning {
                source: source.name.clone(),
                reason: format!(
                    "week {} is outside the configured range 1..={}; hours discarded",
                    week_index, config.week_count
                ),
            });
            for record in &extraction.records {
                aggregator.touch(record.job_id());
            }
        } else {
            for record in extraction.records {
                aggregator.add(record);
            }
        }

        info!(
            source = %summary.name,
            week_index,
            mode = ?summary.mode,
            records = summary.records,
            skipped = summary.skipped,
            "Processed source"
        );
        summaries.push(summary);
    }

    let grid = aggregator.finish();
    info!(
        jobs = grid.len(),
        warnings = warnings.len(),
        "Batch complete"
    );

    Ok(BatchOutcome {
        grid,
        warnings,
        summaries,
    })
}

fn extract(decoded: &Decoded<'_>, week_index: u32, config: &EngineConfig) -> Extraction {
    match decoded {
        Decoded::Table(table) => extract_table(table, week_index, config),
        Decoded::Text(text) => extract_text(text, week_index, config),
    }
}
