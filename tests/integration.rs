//! Integration tests for the hours engine.
//!
//! This test suite covers:
//! - The `/summarize` endpoint over table, CSV and text sources
//! - Week detection from filenames and upload order
//! - Zero-filled week slots and out-of-range warnings
//! - Request validation and configuration errors
//! - Exported week tables reading back into the same grid

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use hours_engine::api::{AppState, create_router};
use hours_engine::config::{ConfigLoader, EngineConfig, RoundingIncrement};
use hours_engine::export::{to_csv, week_tables};
use hours_engine::ingestion::process_batch;
use hours_engine::models::{ExtractionMode, Source, SourceContent, SourceKind, WeekAssignment};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/engine.yaml").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn json_decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => decimal(s),
        other => decimal(&other.to_string()),
    }
}

async fn post_summarize(router: Router, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/summarize")
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn summarize(body: Value) -> (StatusCode, Value) {
    post_summarize(create_router_for_test(), body.to_string()).await
}

fn find_job<'a>(response: &'a Value, job_id: &str) -> &'a Value {
    response["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .find(|job| job["job_id"] == job_id)
        .unwrap_or_else(|| panic!("Job {} not found in {}", job_id, response))
}

fn week_hours(job: &Value, week: usize) -> (Decimal, Decimal) {
    let slot = &job["weeks"][week - 1];
    (
        json_decimal(&slot["straight_hours"]),
        json_decimal(&slot["overtime_hours"]),
    )
}

// =============================================================================
// Endpoint: successful summaries
// =============================================================================

#[tokio::test]
async fn test_summarize_mixed_sources() {
    let (status, body) = summarize(json!({
        "sources": [
            {
                "name": "Week1.xlsx",
                "table": {
                    "headers": ["Job Number", "Regular", "Overtime"],
                    "rows": [["1152", 40.1, 2], ["2001", 12.6, null]]
                }
            },
            {
                "name": "week 2.csv",
                "csv": "Job,Straight,Overtime\n1152,38,0\n"
            },
            {
                "name": "week_3.pdf",
                "text": "Weekly report\n40.00 5.50 ... 1152\n"
            }
        ]
    }))
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["week_count"], 3);
    assert_eq!(body["jobs"].as_array().unwrap().len(), 2);
    assert!(body["warnings"].as_array().unwrap().is_empty());

    let job = find_job(&body, "1152");
    assert_eq!(week_hours(job, 1), (decimal("40.00"), decimal("2.00")));
    assert_eq!(week_hours(job, 2), (decimal("38.00"), decimal("0")));
    assert_eq!(week_hours(job, 3), (decimal("40.00"), decimal("5.50")));

    let job = find_job(&body, "2001");
    assert_eq!(week_hours(job, 1), (decimal("12.50"), decimal("0")));
    assert_eq!(week_hours(job, 2), (Decimal::ZERO, Decimal::ZERO));
    assert_eq!(week_hours(job, 3), (Decimal::ZERO, Decimal::ZERO));
}

#[tokio::test]
async fn test_jobs_are_listed_in_numeric_order() {
    let (status, body) = summarize(json!({
        "sources": [{
            "name": "week_1.csv",
            "csv": "Job,Straight\n1152,8\n99,8\n310,8\n"
        }]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["job_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["99", "310", "1152"]);
}

#[tokio::test]
async fn test_numeric_job_codes_keep_every_digit() {
    let (status, body) = summarize(json!({
        "sources": [{
            "name": "week_1.xlsx",
            "table": {
                "headers": ["Job Number", "Regular", "Overtime"],
                "rows": [[12345678901234567890_u64, 40, 1.5]]
            }
        }]
    }))
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    let job = find_job(&body, "12345678901234567890");
    assert_eq!(week_hours(job, 1), (decimal("40"), decimal("1.5")));
}

#[tokio::test]
async fn test_every_job_has_exactly_week_count_slots() {
    let (status, body) = summarize(json!({
        "week_count": 5,
        "sources": [{
            "name": "week_2.csv",
            "csv": "Job,Straight,Overtime\n1152,40,1\n"
        }]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["week_count"], 5);

    let job = find_job(&body, "1152");
    let weeks = job["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 5);
    for (i, slot) in weeks.iter().enumerate() {
        assert_eq!(slot["week_index"], i as u64 + 1);
    }
    assert_eq!(week_hours(job, 2), (decimal("40"), decimal("1")));
    assert_eq!(week_hours(job, 1), (Decimal::ZERO, Decimal::ZERO));
}

#[tokio::test]
async fn test_clipboard_block_is_overtime_first() {
    let (status, body) = summarize(json!({
        "week_count": 2,
        "sources": [{
            "name": "week_1.pdf",
            "text": "40.00 5.50 ... 1152"
        }]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let job = find_job(&body, "1152");
    assert_eq!(job["clipboard"], "5.50\t40.00\n0.00\t0.00");
}

#[tokio::test]
async fn test_rounding_increment_override() {
    let (status, body) = summarize(json!({
        "rounding_increment": "1.0",
        "sources": [{
            "name": "week_1.csv",
            "csv": "Job,Straight,Overtime\n1152,7.5,0.4\n"
        }]
    }))
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(json_decimal(&body["rounding_increment"]), Decimal::ONE);
    let job = find_job(&body, "1152");
    assert_eq!(week_hours(job, 1), (decimal("8"), Decimal::ZERO));
}

#[tokio::test]
async fn test_sources_without_week_marker_use_upload_order() {
    let (status, body) = summarize(json!({
        "sources": [
            { "name": "first.csv", "csv": "Job,Straight\n1152,10\n" },
            { "name": "second.csv", "csv": "Job,Straight\n1152,20\n" }
        ]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let job = find_job(&body, "1152");
    assert_eq!(week_hours(job, 1).0, decimal("10"));
    assert_eq!(week_hours(job, 2).0, decimal("20"));

    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources[0]["week_assignment"], "upload_order");
    assert_eq!(sources[1]["week_index"], 2);
}

#[tokio::test]
async fn test_out_of_range_week_is_warned() {
    let (status, body) = summarize(json!({
        "sources": [{
            "name": "week_7.csv",
            "csv": "Job,Straight\n1152,40\n"
        }]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["source"], "week_7.csv");

    let job = find_job(&body, "1152");
    for week in 1..=3 {
        assert_eq!(week_hours(job, week), (Decimal::ZERO, Decimal::ZERO));
    }
}

#[tokio::test]
async fn test_unreadable_source_is_warned_and_skipped() {
    let (status, body) = summarize(json!({
        "sources": [
            { "name": "week_1.csv", "csv": "" },
            { "name": "week_2.csv", "csv": "Job,Straight\n1152,40\n" }
        ]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["source"], "week_1.csv");
    assert_eq!(body["sources"][0]["records"], 0);

    let job = find_job(&body, "1152");
    assert_eq!(week_hours(job, 2).0, decimal("40"));
}

#[tokio::test]
async fn test_empty_batch_returns_empty_grid() {
    let (status, body) = summarize(json!({ "sources": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["jobs"].as_array().unwrap().is_empty());
    assert!(body["sources"].as_array().unwrap().is_empty());
}

// =============================================================================
// Endpoint: error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (status, body) =
        post_summarize(create_router_for_test(), "{ not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_sources_field_returns_validation_error() {
    let (status, body) = summarize(json!({ "week_count": 3 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unsupported_increment_returns_400() {
    let (status, body) = summarize(json!({
        "rounding_increment": "0.1",
        "sources": []
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNSUPPORTED_INCREMENT");
}

#[tokio::test]
async fn test_zero_week_count_returns_400() {
    let (status, body) = summarize(json!({
        "week_count": 0,
        "sources": []
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_WEEK_COUNT");
}

#[tokio::test]
async fn test_source_without_payload_returns_400() {
    let (status, body) = summarize(json!({
        "sources": [{ "name": "week_1.csv" }]
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SOURCE");
}

#[tokio::test]
async fn test_source_with_two_payloads_returns_400() {
    let (status, body) = summarize(json!({
        "sources": [{ "name": "week_1.csv", "csv": "Job\n1\n", "text": "1 2 3" }]
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SOURCE");
}

// =============================================================================
// Library: end-to-end processing
// =============================================================================

#[test]
fn test_text_line_with_trailing_job() {
    let sources = vec![Source::from_text("week_1.pdf", "40.00 5.50 ... 1152")];
    let outcome = process_batch(&sources, &EngineConfig::default()).unwrap();

    let week = outcome.grid.week("1152", 1).unwrap();
    assert_eq!(week.straight_hours, decimal("40.00"));
    assert_eq!(week.overtime_hours, decimal("5.50"));
    assert_eq!(outcome.summaries[0].mode, Some(ExtractionMode::Text));
    assert_eq!(outcome.summaries[0].week_assignment, WeekAssignment::Filename);
}

#[test]
fn test_unreadable_document_bytes_are_warned() {
    let sources = vec![
        Source::new(
            "week_1.pdf",
            SourceKind::TextDocument,
            SourceContent::Bytes(vec![0xff, 0xfe, 0xfd]),
        ),
        Source::from_text("week_2.pdf", "8.00 1.00 ... 1152"),
    ];
    let outcome = process_batch(&sources, &EngineConfig::default()).unwrap();

    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].source, "week_1.pdf");
    assert!(outcome.grid.week("1152", 1).unwrap().is_zero());
    assert_eq!(
        outcome.grid.week("1152", 2).unwrap().straight_hours,
        decimal("8")
    );
}

#[test]
fn test_exported_week_tables_reproduce_the_grid() {
    let config = EngineConfig::default();
    let sources = vec![
        Source::from_csv(
            "week_1.csv",
            "Job Number,Regular,Overtime\n1152,40.1,2.3\n2001,7.9,0\n",
        ),
        Source::from_text("week_2.pdf", "38.00 0.00 ... 1152\n12.25 4.75 ... 2001\n"),
    ];
    let original = process_batch(&sources, &config).unwrap();

    let exported: Vec<Source> = week_tables(&original.grid)
        .into_iter()
        .map(|week| Source::from_table(week.file_name(), week.table))
        .collect();
    let reloaded = process_batch(&exported, &config).unwrap();

    assert_eq!(reloaded.grid, original.grid);
    assert!(reloaded.warnings.is_empty());
}

#[test]
fn test_exported_csv_reproduces_the_grid() {
    let config = EngineConfig::default();
    let sources = vec![Source::from_csv(
        "week_1.csv",
        "Job,Straight,Overtime\n1152,40,2.5\n99,3.2,0\n",
    )];
    let original = process_batch(&sources, &config).unwrap();

    let exported: Vec<Source> = week_tables(&original.grid)
        .into_iter()
        .map(|week| Source::from_csv(week.file_name(), to_csv(&week.table).unwrap()))
        .collect();
    let reloaded = process_batch(&exported, &config).unwrap();

    assert_eq!(reloaded.grid, original.grid);
}

#[test]
fn test_all_supported_increments_round_consistently() {
    for increment in RoundingIncrement::ALL {
        let config = EngineConfig {
            rounding_increment: increment,
            ..EngineConfig::default()
        };
        let sources = vec![Source::from_csv("week_1.csv", "Job,Straight\n1152,7.3\n")];
        let outcome = process_batch(&sources, &config).unwrap();

        let hours = outcome.grid.week("1152", 1).unwrap().straight_hours;
        let step = increment.as_decimal();
        assert_eq!(hours % step, Decimal::ZERO, "increment {}", increment);
        assert!((hours - decimal("7.3")).abs() <= step / Decimal::from(2));
    }
}
