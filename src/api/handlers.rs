//! HTTP request handlers for the hours engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{EngineConfig, RoundingIncrement};
use crate::error::EngineResult;
use crate::ingestion::process_batch;
use crate::models::Source;

use super::request::SummarizeRequest;
use super::response::{ApiError, ApiErrorResponse, SummaryResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize_handler))
        .with_state(state)
}

/// Handler for POST /summarize endpoint.
///
/// Accepts a batch of sources and returns the canonical grid with
/// per-source warnings and summaries.
async fn summarize_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summarize request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_error(ApiErrorResponse::bad_request(error));
        }
    };

    let config = match request_config(state.config(), &request) {
        Ok(config) => config,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid configuration override");
            return json_error(err.into());
        }
    };

    let sources = match request
        .sources
        .into_iter()
        .map(|source| source.into_source())
        .collect::<Result<Vec<Source>, ApiError>>()
    {
        Ok(sources) => sources,
        Err(error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %error.message,
                "Invalid source payload"
            );
            return json_error(ApiErrorResponse::bad_request(error));
        }
    };

    let start_time = Instant::now();
    match process_batch(&sources, &config) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                sources = sources.len(),
                jobs = outcome.grid.len(),
                warnings = outcome.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Summary completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(SummaryResponse::from_outcome(outcome, &config)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Summary failed");
            json_error(err.into())
        }
    }
}

/// Applies per-request overrides to the server configuration.
fn request_config(base: &EngineConfig, request: &SummarizeRequest) -> EngineResult<EngineConfig> {
    let mut config = base.clone();
    if let Some(increment) = request.rounding_increment {
        config.rounding_increment = RoundingIncrement::try_from(increment)?;
    }
    if let Some(week_count) = request.week_count {
        config.week_count = week_count;
    }
    config.validate()?;
    Ok(config)
}

fn json_error(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
