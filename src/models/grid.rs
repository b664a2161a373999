//! The canonical per-job, per-week grid and batch outcome.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{SourceSummary, SourceWarning};

/// Hours for one job in one week slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekHours {
    /// The 1-based week.
    pub week_index: u32,
    /// Regular hours.
    pub straight_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
}

impl WeekHours {
    /// A week with no hours recorded.
    pub fn zero(week_index: u32) -> Self {
        Self {
            week_index,
            straight_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
        }
    }

    /// Returns true if both values are zero.
    pub fn is_zero(&self) -> bool {
        self.straight_hours.is_zero() && self.overtime_hours.is_zero()
    }
}

/// The zero-filled `job -> weeks` table handed to presentation.
///
/// Every job holds exactly `week_count` slots, for weeks `1..=week_count`
/// in order. Iteration is numeric when every job id is made of digits and
/// lexical otherwise.
///
/// # Example
///
/// ```
/// use hours_engine::ingestion::aggregate;
/// use hours_engine::models::HourRecord;
/// use rust_decimal::Decimal;
///
/// let records = vec![
///     HourRecord::new("1200", 1, Decimal::from(8), Decimal::ZERO).unwrap(),
///     HourRecord::new("950", 2, Decimal::from(40), Decimal::from(2)).unwrap(),
/// ];
/// let grid = aggregate(records, 3);
///
/// assert_eq!(grid.job_ids(), vec!["950", "1200"]);
/// assert_eq!(grid.weeks("950").unwrap().len(), 3);
/// assert!(grid.weeks("950").unwrap()[0].is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalGrid {
    week_count: u32,
    jobs: BTreeMap<String, Vec<WeekHours>>,
}

impl CanonicalGrid {
    /// Builds a grid from fully populated job rows.
    pub(crate) fn from_jobs(week_count: u32, jobs: BTreeMap<String, Vec<WeekHours>>) -> Self {
        debug_assert!(
            jobs.values().all(|weeks| weeks.len() == week_count as usize),
            "every job must carry exactly week_count slots"
        );
        Self { week_count, jobs }
    }

    /// The number of week slots per job.
    pub fn week_count(&self) -> u32 {
        self.week_count
    }

    /// Number of jobs in the grid.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns true if no source contributed a job.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// All week slots for a job, in week order.
    pub fn weeks(&self, job_id: &str) -> Option<&[WeekHours]> {
        self.jobs.get(job_id).map(Vec::as_slice)
    }

    /// A single week slot for a job.
    pub fn week(&self, job_id: &str, week_index: u32) -> Option<&WeekHours> {
        let slot = week_index.checked_sub(1)? as usize;
        self.jobs.get(job_id)?.get(slot)
    }

    /// Job ids in presentation order.
    pub fn job_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.jobs.keys().map(String::as_str).collect();
        if ids.iter().all(|id| is_numeric_id(id)) {
            ids.sort_by(|a, b| numeric_key(a).cmp(&numeric_key(b)).then_with(|| a.cmp(b)));
        }
        ids
    }

    /// Iterates `(job_id, weeks)` in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[WeekHours])> + '_ {
        self.job_ids()
            .into_iter()
            .filter_map(move |id| self.weeks(id).map(|weeks| (id, weeks)))
    }
}

fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Orders digit strings by value without parsing, so arbitrarily long job
/// codes cannot overflow.
fn numeric_key(id: &str) -> (usize, &str) {
    let significant = id.trim_start_matches('0');
    (significant.len(), significant)
}

/// Everything a batch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// The canonical grid.
    pub grid: CanonicalGrid,
    /// One warning per source that failed entirely or was out of range.
    pub warnings: Vec<SourceWarning>,
    /// One summary per source, in upload order.
    pub summaries: Vec<SourceSummary>,
}
