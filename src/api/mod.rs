//! HTTP API module for the hours engine.
//!
//! This module provides the REST endpoint that turns an uploaded batch of
//! weekly reports into the canonical job-week grid.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{SourceRequest, SummarizeRequest};
pub use response::{ApiError, ApiErrorResponse, JobSummary, SummaryResponse};
pub use state::AppState;
