//! The validated per-source hours record.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Straight and overtime hours for one job in one week, as read from a
/// single source row or line.
///
/// A record can only be built through [`HourRecord::new`], which enforces a
/// non-empty job id, a 1-based week and non-negative hours; the fields are
/// read-only afterwards.
///
/// # Example
///
/// ```
/// use hours_engine::models::HourRecord;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = HourRecord::new(
///     "1152",
///     2,
///     Decimal::from_str("40.00").unwrap(),
///     Decimal::from_str("5.50").unwrap(),
/// )
/// .unwrap();
/// assert_eq!(record.job_id(), "1152");
/// assert_eq!(record.week_index(), 2);
///
/// assert!(HourRecord::new("", 1, Decimal::ZERO, Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourRecord {
    job_id: String,
    week_index: u32,
    straight_hours: Decimal,
    overtime_hours: Decimal,
}

impl HourRecord {
    /// Validates and builds a record. The job id is trimmed.
    pub fn new(
        job_id: impl Into<String>,
        week_index: u32,
        straight_hours: Decimal,
        overtime_hours: Decimal,
    ) -> EngineResult<Self> {
        let job_id = job_id.into().trim().to_string();
        let invalid = |message: &str| EngineError::InvalidRecord {
            job_id: job_id.clone(),
            message: message.to_string(),
        };

        if job_id.is_empty() {
            return Err(invalid("job id is empty"));
        }
        if week_index == 0 {
            return Err(invalid("week index must be at least 1"));
        }
        if straight_hours.is_sign_negative() && !straight_hours.is_zero() {
            return Err(invalid("straight hours are negative"));
        }
        if overtime_hours.is_sign_negative() && !overtime_hours.is_zero() {
            return Err(invalid("overtime hours are negative"));
        }

        Ok(Self {
            job_id,
            week_index,
            straight_hours,
            overtime_hours,
        })
    }

    /// The job the hours were worked against.
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// The 1-based week the hours belong to.
    pub fn week_index(&self) -> u32 {
        self.week_index
    }

    /// Regular hours.
    pub fn straight_hours(&self) -> Decimal {
        self.straight_hours
    }

    /// Overtime hours.
    pub fn overtime_hours(&self) -> Decimal {
        self.overtime_hours
    }
}
