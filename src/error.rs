//! Error types for the hours engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only configuration and source-level failures ever reach a caller; row-level
//! parse failures are absorbed by the extractors.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the hours engine.
///
/// # Example
///
/// ```
/// use hours_engine::error::EngineError;
///
/// let error = EngineError::InvalidWeekCount { week_count: 0 };
/// assert_eq!(error.to_string(), "Week count must be at least 1, got 0");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The rounding increment is not one of the supported values.
    #[error("Unsupported rounding increment {increment}; expected one of 0.25, 0.5, 1.0")]
    UnsupportedIncrement {
        /// The rejected increment.
        increment: Decimal,
    },

    /// The number of weeks in a batch must be positive.
    #[error("Week count must be at least 1, got {week_count}")]
    InvalidWeekCount {
        /// The rejected week count.
        week_count: u32,
    },

    /// A whole source could not be decoded.
    #[error("Failed to read source '{source_name}': {message}")]
    SourceRead {
        /// The filename of the source.
        source_name: String,
        /// A description of the read failure.
        message: String,
    },

    /// A record failed validation.
    #[error("Invalid record for job '{job_id}': {message}")]
    InvalidRecord {
        /// The job identifier on the rejected record.
        job_id: String,
        /// What made the record invalid.
        message: String,
    },

    /// Exporting the grid failed.
    #[error("Export error: {message}")]
    Export {
        /// A description of the export failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors that must abort a batch before any source is read.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::UnsupportedIncrement { .. }
                | EngineError::InvalidWeekCount { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
