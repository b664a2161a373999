//! Configuration types for a processing run.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `engine.yaml` or built directly by callers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The increment every straight and overtime value is quantized to.
///
/// Only the three increments offered to users are representable, so an
/// unsupported value is rejected when the configuration is built.
///
/// # Example
///
/// ```
/// use hours_engine::config::RoundingIncrement;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let increment = RoundingIncrement::try_from(Decimal::from_str("0.5").unwrap()).unwrap();
/// assert_eq!(increment, RoundingIncrement::Half);
/// assert!(RoundingIncrement::try_from(Decimal::from_str("0.1").unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub enum RoundingIncrement {
    /// Quarter-hour rounding (0.25).
    #[default]
    Quarter,
    /// Half-hour rounding (0.5).
    Half,
    /// Whole-hour rounding (1.0).
    Whole,
}

impl RoundingIncrement {
    /// All supported increments, smallest first.
    pub const ALL: [RoundingIncrement; 3] = [
        RoundingIncrement::Quarter,
        RoundingIncrement::Half,
        RoundingIncrement::Whole,
    ];

    /// Returns the increment as a decimal number of hours.
    pub fn as_decimal(self) -> Decimal {
        match self {
            RoundingIncrement::Quarter => Decimal::new(25, 2),
            RoundingIncrement::Half => Decimal::new(5, 1),
            RoundingIncrement::Whole => Decimal::ONE,
        }
    }
}

impl TryFrom<Decimal> for RoundingIncrement {
    type Error = EngineError;

    fn try_from(value: Decimal) -> EngineResult<Self> {
        Self::ALL
            .into_iter()
            .find(|increment| increment.as_decimal() == value)
            .ok_or(EngineError::UnsupportedIncrement { increment: value })
    }
}

impl From<RoundingIncrement> for Decimal {
    fn from(increment: RoundingIncrement) -> Self {
        increment.as_decimal()
    }
}

impl std::fmt::Display for RoundingIncrement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_decimal())
    }
}

/// Which of the two hour columns comes first.
///
/// Report variants disagree on this, so it is a per-deployment setting
/// rather than something inferred line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourOrder {
    /// Straight hours, then overtime hours.
    StraightFirst,
    /// Overtime hours, then straight hours.
    OvertimeFirst,
}

impl HourOrder {
    /// Maps a pair of values in column order to `(straight, overtime)`.
    pub fn assign<T>(self, first: T, second: T) -> (T, T) {
        match self {
            HourOrder::StraightFirst => (first, second),
            HourOrder::OvertimeFirst => (second, first),
        }
    }

    /// Maps `(straight, overtime)` back into column order.
    pub fn arrange<T>(self, straight: T, overtime: T) -> (T, T) {
        match self {
            HourOrder::StraightFirst => (straight, overtime),
            HourOrder::OvertimeFirst => (overtime, straight),
        }
    }
}

/// Where the job code sits on a free-text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPosition {
    /// Trailing token if it is an integer, otherwise the leading token.
    #[default]
    Auto,
    /// Always the first token.
    Leading,
    /// Always the last token.
    Trailing,
}

/// Column layout used when reading unstructured text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLayout {
    /// Where the job code is found.
    #[serde(default)]
    pub job_position: JobPosition,
    /// Which hour value is read first.
    #[serde(default = "default_text_hour_order")]
    pub hour_order: HourOrder,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            job_position: JobPosition::Auto,
            hour_order: default_text_hour_order(),
        }
    }
}

fn default_text_hour_order() -> HourOrder {
    HourOrder::StraightFirst
}

/// How two records for the same job and week are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later record replaces the earlier one.
    #[default]
    LastWriteWins,
    /// Hours from both records are added together.
    Sum,
}

/// Default number of week slots per job.
pub const DEFAULT_WEEK_COUNT: u32 = 3;

/// Settings for one processing run.
///
/// Built once per batch and passed by reference into the engine; nothing in
/// the engine reads configuration from anywhere else.
///
/// # Example
///
/// ```
/// use hours_engine::config::{EngineConfig, RoundingIncrement};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.rounding_increment, RoundingIncrement::Quarter);
/// assert_eq!(config.week_count, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Increment applied to every hour value.
    #[serde(default)]
    pub rounding_increment: RoundingIncrement,
    /// Number of week slots rendered per job.
    #[serde(default = "default_week_count")]
    pub week_count: u32,
    /// Layout of free-text lines.
    #[serde(default)]
    pub text_layout: TextLayout,
    /// Policy for repeated job/week pairs.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    /// Drop tabular rows whose straight and overtime hours are both zero.
    #[serde(default)]
    pub drop_zero_rows: bool,
    /// Column order for exported per-job text blocks.
    #[serde(default = "default_display_order")]
    pub display_order: HourOrder,
}

fn default_week_count() -> u32 {
    DEFAULT_WEEK_COUNT
}

fn default_display_order() -> HourOrder {
    HourOrder::OvertimeFirst
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounding_increment: RoundingIncrement::default(),
            week_count: DEFAULT_WEEK_COUNT,
            text_layout: TextLayout::default(),
            duplicate_policy: DuplicatePolicy::default(),
            drop_zero_rows: false,
            display_order: default_display_order(),
        }
    }
}

impl EngineConfig {
    /// Builds a validated configuration from a raw increment and week count.
    ///
    /// Returns `UnsupportedIncrement` or `InvalidWeekCount` when either value
    /// is out of range.
    pub fn new(rounding_increment: Decimal, week_count: u32) -> EngineResult<Self> {
        let config = Self {
            rounding_increment: RoundingIncrement::try_from(rounding_increment)?,
            week_count,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings that cannot be enforced by their types.
    pub fn validate(&self) -> EngineResult<()> {
        if self.week_count == 0 {
            return Err(EngineError::InvalidWeekCount {
                week_count: self.week_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_supported_increments_convert() {
        assert_eq!(
            RoundingIncrement::try_from(dec("0.25")).unwrap(),
            RoundingIncrement::Quarter
        );
        assert_eq!(
            RoundingIncrement::try_from(dec("0.50")).unwrap(),
            RoundingIncrement::Half
        );
        assert_eq!(
            RoundingIncrement::try_from(dec("1")).unwrap(),
            RoundingIncrement::Whole
        );
    }

    #[test]
    fn test_unsupported_increment_is_rejected() {
        match RoundingIncrement::try_from(dec("0.1")) {
            Err(EngineError::UnsupportedIncrement { increment }) => {
                assert_eq!(increment, dec("0.1"));
            }
            other => panic!("Expected UnsupportedIncrement, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_week_count_is_rejected() {
        let config = EngineConfig {
            week_count: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidWeekCount { week_count: 0 })
        ));
    }

    #[test]
    fn test_new_validates_both_fields() {
        assert!(EngineConfig::new(dec("0.5"), 5).is_ok());
        assert!(EngineConfig::new(dec("0.3"), 5).is_err());
        assert!(EngineConfig::new(dec("0.5"), 0).is_err());
    }

    #[test]
    fn test_hour_order_assign_and_arrange() {
        assert_eq!(HourOrder::StraightFirst.assign(1, 2), (1, 2));
        assert_eq!(HourOrder::OvertimeFirst.assign(1, 2), (2, 1));
        assert_eq!(HourOrder::OvertimeFirst.arrange(40, 5), (5, 40));
    }

    #[test]
    fn test_deserialize_from_json_with_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"rounding_increment": 0.5, "week_count": 5}"#).unwrap();
        assert_eq!(config.rounding_increment, RoundingIncrement::Half);
        assert_eq!(config.week_count, 5);
        assert_eq!(config.text_layout, TextLayout::default());
        assert_eq!(config.duplicate_policy, DuplicatePolicy::LastWriteWins);
        assert_eq!(config.display_order, HourOrder::OvertimeFirst);
    }

    #[test]
    fn test_deserialize_rejects_unsupported_increment() {
        let result: Result<EngineConfig, _> =
            serde_json::from_str(r#"{"rounding_increment": 0.75}"#);
        assert!(result.is_err());
    }
}
