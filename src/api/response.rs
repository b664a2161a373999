//! Response types for the hours engine API.
//!
//! This module defines the summary response body, the error response
//! structures, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, HourOrder};
use crate::error::EngineError;
use crate::export::clipboard_block;
use crate::models::{BatchOutcome, SourceSummary, SourceWarning, WeekHours};

/// Response body for a successful `/summarize` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Increment the hours were rounded to.
    pub rounding_increment: Decimal,
    /// Number of week slots per job.
    pub week_count: u32,
    /// One entry per job, in presentation order.
    pub jobs: Vec<JobSummary>,
    /// Sources that failed or fell outside the week range.
    pub warnings: Vec<SourceWarning>,
    /// Per-source processing summaries, in upload order.
    pub sources: Vec<SourceSummary>,
}

/// A job's row of the canonical grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    /// The job identifier.
    pub job_id: String,
    /// Exactly `week_count` week slots, in week order.
    pub weeks: Vec<WeekHours>,
    /// Tab-separated copy block for the job.
    pub clipboard: String,
}

impl SummaryResponse {
    /// Builds the response from a batch outcome.
    pub fn from_outcome(outcome: BatchOutcome, config: &EngineConfig) -> Self {
        let order: HourOrder = config.display_order;
        let jobs = outcome
            .grid
            .iter()
            .map(|(job_id, weeks)| JobSummary {
                job_id: job_id.to_string(),
                weeks: weeks.to_vec(),
                clipboard: clipboard_block(weeks, order),
            })
            .collect();

        Self {
            rounding_increment: config.rounding_increment.as_decimal(),
            week_count: outcome.grid.week_count(),
            jobs,
            warnings: outcome.warnings,
            sources: outcome.summaries,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::UnsupportedIncrement { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNSUPPORTED_INCREMENT",
                    message,
                    "Supported rounding increments are 0.25, 0.5 and 1.0 hours",
                ),
            ),
            EngineError::InvalidWeekCount { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_WEEK_COUNT",
                    message,
                    "The week count must be a positive integer",
                ),
            ),
            EngineError::SourceRead { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("SOURCE_READ_ERROR", message))
            }
            EngineError::InvalidRecord { .. } => {
                ApiErrorResponse::bad_request(ApiError::validation_error(message))
            }
            EngineError::Export { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}
