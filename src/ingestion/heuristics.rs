//! Line-level extraction heuristics for unstructured text.
//!
//! Text pulled out of a paginated report has no reliable columns, so each
//! line is tried against an ordered list of [`Heuristic`]s and the first one
//! that matches wins. Each heuristic is a pure function of the line and the
//! configured [`TextLayout`]; rounding happens later, in the extractor.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{JobPosition, TextLayout};

use super::rounding::parse_decimal;

/// Three or more decimals, then a multi-digit job code closing the line.
/// Descriptive words may sit between the numbers and the code.
static DECIMAL_RUN_TRAILING_JOB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(\d+\.\d+)\s+(\d+\.\d+)(?:\s+\d+\.\d+)+(?:\s+.*)?\s+(\d{2,})$")
        .expect("decimal run pattern is valid")
});

/// An integer job code opening the line, then two decimals.
static LEADING_JOB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)[:.)\-]?\s+(\d+\.\d+)\s+(\d+\.\d+)(?:\s|$)")
        .expect("leading job pattern is valid")
});

/// Hours found on one line, before rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// The job code.
    pub job_id: String,
    /// Regular hours.
    pub straight_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
}

/// One strategy for reading hours off a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Whitespace tokens with the job code at the end or the start.
    Tokenized,
    /// A run of three or more decimals followed by a job code at line end.
    DecimalRunTrailingJob,
    /// A job code at line start followed by two decimals.
    LeadingJob,
}

impl Heuristic {
    /// The fixed priority order in which heuristics are tried.
    pub const CHAIN: [Heuristic; 3] = [
        Heuristic::Tokenized,
        Heuristic::DecimalRunTrailingJob,
        Heuristic::LeadingJob,
    ];

    /// A stable name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Tokenized => "tokenized",
            Heuristic::DecimalRunTrailingJob => "decimal_run_trailing_job",
            Heuristic::LeadingJob => "leading_job",
        }
    }

    /// Applies this heuristic to a single trimmed line.
    pub fn apply(self, line: &str, layout: &TextLayout) -> Option<LineMatch> {
        match self {
            Heuristic::Tokenized => tokenized(line, layout),
            Heuristic::DecimalRunTrailingJob => decimal_run_trailing_job(line, layout),
            Heuristic::LeadingJob => leading_job(line, layout),
        }
    }
}

/// Runs the heuristic chain over a line and returns the first match.
///
/// # Example
///
/// ```
/// use hours_engine::config::TextLayout;
/// use hours_engine::ingestion::{match_line, Heuristic};
/// use rust_decimal::Decimal;
///
/// let (heuristic, found) = match_line("40.00 5.50 ... 1152", &TextLayout::default()).unwrap();
/// assert_eq!(heuristic, Heuristic::Tokenized);
/// assert_eq!(found.job_id, "1152");
/// assert_eq!(found.straight_hours, Decimal::new(4000, 2));
/// assert_eq!(found.overtime_hours, Decimal::new(550, 2));
///
/// assert!(match_line("Page 1 of 3", &TextLayout::default()).is_none());
/// ```
pub fn match_line(line: &str, layout: &TextLayout) -> Option<(Heuristic, LineMatch)> {
    Heuristic::CHAIN
        .into_iter()
        .find_map(|heuristic| heuristic.apply(line, layout).map(|found| (heuristic, found)))
}

fn tokenized(line: &str, layout: &TextLayout) -> Option<LineMatch> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }

    let last = tokens.len() - 1;
    let job_trails = match layout.job_position {
        JobPosition::Auto => is_integer(tokens[last]),
        JobPosition::Leading => false,
        JobPosition::Trailing => true,
    };

    let (job, first, second) = if job_trails {
        (tokens[last], tokens[0], tokens[1])
    } else {
        (tokens[0], tokens[1], tokens[2])
    };

    if !is_job_code(job) {
        return None;
    }
    build_match(job, parse_hours(first)?, parse_hours(second)?, layout)
}

fn decimal_run_trailing_job(line: &str, layout: &TextLayout) -> Option<LineMatch> {
    let captures = DECIMAL_RUN_TRAILING_JOB.captures(line)?;
    let first = parse_hours(captures.get(1)?.as_str())?;
    let second = parse_hours(captures.get(2)?.as_str())?;
    build_match(captures.get(3)?.as_str(), first, second, layout)
}

fn leading_job(line: &str, layout: &TextLayout) -> Option<LineMatch> {
    let captures = LEADING_JOB.captures(line)?;
    let first = parse_hours(captures.get(2)?.as_str())?;
    let second = parse_hours(captures.get(3)?.as_str())?;
    build_match(captures.get(1)?.as_str(), first, second, layout)
}

fn build_match(job: &str, first: Decimal, second: Decimal, layout: &TextLayout) -> Option<LineMatch> {
    let (straight_hours, overtime_hours) = layout.hour_order.assign(first, second);
    Some(LineMatch {
        job_id: job.to_string(),
        straight_hours,
        overtime_hours,
    })
}

fn is_integer(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// A job code carries at least one digit and no punctuation beyond `-`, `_`
/// and `/`. Rejects words like "Total" or "Page" in the job slot.
fn is_job_code(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '/'))
}

fn parse_hours(token: &str) -> Option<Decimal> {
    parse_decimal(token).filter(|hours| !hours.is_sign_negative())
}
