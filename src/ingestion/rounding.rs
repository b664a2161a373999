//! Hour rounding.
//!
//! Every straight and overtime value is quantized to the configured
//! [`RoundingIncrement`] before it becomes part of a record. All arithmetic
//! is decimal so that quarter-hour midpoints such as `0.125` round the same
//! way everywhere.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RoundingIncrement;
use crate::models::Cell;

/// Parses trimmed text as a decimal, accepting plain or scientific notation.
/// Digit separators such as `1_000` are not numbers here.
///
/// # Example
///
/// ```
/// use hours_engine::ingestion::parse_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal(" 40.50 "), Some(Decimal::new(4050, 2)));
/// assert_eq!(parse_decimal("4.05e1"), Some(Decimal::new(405, 1)));
/// assert_eq!(parse_decimal("n/a"), None);
/// assert_eq!(parse_decimal("1_000"), None);
/// ```
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Coerces a raw cell to a decimal number of hours.
///
/// Numbers go through their shortest textual form, so `0.125_f64` becomes
/// exactly `0.125` rather than its binary approximation. Integers convert
/// exactly. Returns `None` for empty cells, non-numeric text and non-finite
/// numbers.
pub fn coerce_hours(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Empty => None,
        Cell::Text(text) => parse_decimal(text),
        Cell::Integer(value) => Some(Decimal::from(*value)),
        Cell::Number(value) if value.is_finite() => parse_decimal(&value.to_string()),
        Cell::Number(_) => None,
    }
}

/// Rounds a decimal to the nearest multiple of `increment`.
///
/// Midpoints round away from zero. Overflow yields zero.
pub fn round_decimal(value: Decimal, increment: RoundingIncrement) -> Decimal {
    let step = increment.as_decimal();
    let rounded = value
        .checked_div(step)
        .map(|units| units.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|units| units.checked_mul(step))
        .unwrap_or(Decimal::ZERO);

    // A value like -0.4 rounds to zero, never negative zero.
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Coerces `value` and rounds it to `increment`.
///
/// Any coercion failure (empty, non-numeric, non-finite) yields `0` and is
/// never reported. This silent-zero policy keeps one bad cell from
/// discarding a whole row, but it also means malformed input is
/// indistinguishable from a genuine zero; use [`coerce_hours`] when the
/// difference matters.
///
/// # Examples
///
/// ```
/// use hours_engine::config::RoundingIncrement;
/// use hours_engine::ingestion::round_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let quarter = RoundingIncrement::Quarter;
/// assert_eq!(round_hours("0.125", quarter), Decimal::from_str("0.25").unwrap());
/// assert_eq!(round_hours(7.6, RoundingIncrement::Half), Decimal::from_str("7.5").unwrap());
/// assert_eq!(round_hours("not a number", quarter), Decimal::ZERO);
/// ```
pub fn round_hours(value: impl Into<Cell>, increment: RoundingIncrement) -> Decimal {
    coerce_hours(&value.into())
        .map(|hours| round_decimal(hours, increment))
        .unwrap_or(Decimal::ZERO)
}
