//! Job-week aggregation.
//!
//! Folds records from many single-week sources into a [`CanonicalGrid`].
//! Every job that is seen ends up with exactly `week_count` slots; weeks
//! without data stay at zero.

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::DuplicatePolicy;
use crate::models::{CanonicalGrid, HourRecord, WeekHours};

/// Incrementally builds a [`CanonicalGrid`].
///
/// The duplicate policy is fixed when the aggregator is created, so every
/// repeated job/week pair in a batch is resolved the same way.
///
/// # Example
///
/// ```
/// use hours_engine::config::DuplicatePolicy;
/// use hours_engine::ingestion::Aggregator;
/// use hours_engine::models::HourRecord;
/// use rust_decimal::Decimal;
///
/// let mut aggregator = Aggregator::new(3, DuplicatePolicy::Sum);
/// aggregator.add(HourRecord::new("1152", 1, Decimal::from(20), Decimal::ZERO).unwrap());
/// aggregator.add(HourRecord::new("1152", 1, Decimal::from(18), Decimal::ONE).unwrap());
///
/// let grid = aggregator.finish();
/// assert_eq!(grid.week("1152", 1).unwrap().straight_hours, Decimal::from(38));
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator {
    week_count: u32,
    policy: DuplicatePolicy,
    jobs: BTreeMap<String, Vec<WeekHours>>,
}

impl Aggregator {
    /// Creates an empty aggregator.
    pub fn new(week_count: u32, policy: DuplicatePolicy) -> Self {
        Self {
            week_count,
            policy,
            jobs: BTreeMap::new(),
        }
    }

    /// Ensures a job has a row in the grid, even if none of its hours land
    /// inside the week range.
    pub fn touch(&mut self, job_id: &str) -> &mut Vec<WeekHours> {
        let week_count = self.week_count;
        self.jobs
            .entry(job_id.to_string())
            .or_insert_with(|| (1..=week_count).map(WeekHours::zero).collect())
    }

    /// Folds one record into the grid.
    ///
    /// Returns `false` when the record's week lies outside `1..=week_count`;
    /// its job is still listed but the hours are discarded.
    pub fn add(&mut self, record: HourRecord) -> bool {
        let policy = self.policy;
        let week_count = self.week_count;
        let weeks = self.touch(record.job_id());

        let slot = match record.week_index().checked_sub(1) {
            Some(slot) if record.week_index() <= week_count => slot as usize,
            _ => {
                warn!(
                    job_id = record.job_id(),
                    week_index = record.week_index(),
                    week_count,
                    "Discarding hours outside the week range"
                );
                return false;
            }
        };

        let week = &mut weeks[slot];
        match policy {
            DuplicatePolicy::LastWriteWins => {
                week.straight_hours = record.straight_hours();
                week.overtime_hours = record.overtime_hours();
            }
            DuplicatePolicy::Sum => {
                let straight = week.straight_hours.checked_add(record.straight_hours());
                let overtime = week.overtime_hours.checked_add(record.overtime_hours());
                match straight.zip(overtime) {
                    Some((straight, overtime)) => {
                        week.straight_hours = straight;
                        week.overtime_hours = overtime;
                    }
                    None => {
                        // The slot keeps its previous total.
                        warn!(
                            job_id = record.job_id(),
                            week_index = record.week_index(),
                            "Discarding hours that overflow the week total"
                        );
                    }
                }
            }
        }
        true
    }

    /// Completes the grid.
    pub fn finish(self) -> CanonicalGrid {
        CanonicalGrid::from_jobs(self.week_count, self.jobs)
    }
}

/// Aggregates records into a grid of `week_count` weeks using
/// last-write-wins for repeated job/week pairs.
///
/// # Example
///
/// ```
/// use hours_engine::ingestion::aggregate;
/// use hours_engine::models::HourRecord;
/// use rust_decimal::Decimal;
///
/// let record = HourRecord::new("1152", 2, Decimal::from(40), Decimal::from(5)).unwrap();
/// let grid = aggregate(vec![record], 3);
///
/// let weeks = grid.weeks("1152").unwrap();
/// assert!(weeks[0].is_zero());
/// assert_eq!(weeks[1].straight_hours, Decimal::from(40));
/// assert!(weeks[2].is_zero());
/// ```
pub fn aggregate<I>(records: I, week_count: u32) -> CanonicalGrid
where
    I: IntoIterator<Item = HourRecord>,
{
    let mut aggregator = Aggregator::new(week_count, DuplicatePolicy::LastWriteWins);
    for record in records {
        aggregator.add(record);
    }
    aggregator.finish()
}
