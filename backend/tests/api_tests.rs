//! HTTP boundary tests
//!
//! Exercises the router against an unreachable store, covering:
//! - form options, data version and bulk progress endpoints
//! - validation failures rejected before any connection is attempted
//! - connectivity failures surfaced as a single readable error

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use crop_portal_backend::{config::DatabaseConfig, create_app, AppState, Config};
use crop_shared::BulkProgress;
use serde_json::{json, Value};
use tower::ServiceExt;

// ============================================================================
// Helpers
// ============================================================================

fn unreachable_state() -> AppState {
    let config = Config {
        database: DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            acquire_timeout_secs: 1,
            ..DatabaseConfig::default()
        },
        ..Config::default()
    };
    AppState::new(config)
}

fn unreachable_app() -> Router {
    create_app(unreachable_state())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn valid_entry() -> Value {
    json!({
        "crop_name": "Corn",
        "planting_date": "2024-04-01",
        "harvest_date": "2024-08-20",
        "growth_stage": "Vegetative",
        "pest_control_measures": "Use of organic pesticides",
        "yield_prediction": 2100
    })
}

// ============================================================================
// Endpoints That Need No Store
// ============================================================================

#[tokio::test]
async fn test_form_options_lists_closed_sets() {
    let (status, body) = send(unreachable_app(), Method::GET, "/api/v1/crops/options", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crop_names"].as_array().unwrap().len(), 10);
    assert_eq!(body["growth_stages"][4], "Maturity");
    assert_eq!(body["pest_control_measures"].as_array().unwrap().len(), 6);
    assert_eq!(body["bulk_presets"], json!([1000, 10000, 100000]));
}

#[tokio::test]
async fn test_data_version_starts_at_zero() {
    let (status, body) = send(unreachable_app(), Method::GET, "/api/v1/crops/changes", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_version"], 0);
}

#[tokio::test]
async fn test_bulk_progress_empty_before_any_run() {
    let (status, body) =
        send(unreachable_app(), Method::GET, "/api/v1/crops/bulk/progress", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], Value::Null);
    assert_eq!(body["complete"], false);
    assert_eq!(body["data_version"], 0);
}

#[tokio::test]
async fn test_bulk_progress_reports_published_batches() {
    let state = unreachable_state();
    let notifier = state.notifier.clone();
    let app = create_app(state);

    notifier.publish_progress(BulkProgress {
        batch: 2,
        inserted: 20_000,
        total: 25_000,
    });
    let (_, body) = send(app.clone(), Method::GET, "/api/v1/crops/bulk/progress", None).await;
    assert_eq!(body["progress"]["batch"], 2);
    assert_eq!(body["progress"]["inserted"], 20_000);
    assert_eq!(body["complete"], false);

    notifier.publish_progress(BulkProgress {
        batch: 3,
        inserted: 25_000,
        total: 25_000,
    });
    let (_, body) = send(app, Method::GET, "/api/v1/crops/bulk/progress", None).await;
    assert_eq!(body["progress"]["inserted"], 25_000);
    assert_eq!(body["complete"], true);
}

#[tokio::test]
async fn test_health_reports_disconnected_store() {
    let (status, body) = send(unreachable_app(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "disconnected");
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_bulk_insert_of_zero_records_rejected() {
    let (status, body) = send(
        unreachable_app(),
        Method::POST,
        "/api/v1/crops/bulk",
        Some(json!({ "total_records": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "total_records");
}

#[tokio::test]
async fn test_negative_yield_rejected() {
    let mut entry = valid_entry();
    entry["yield_prediction"] = json!(-1);

    let (status, body) = send(unreachable_app(), Method::POST, "/api/v1/crops", Some(entry)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "yield_prediction");
}

#[tokio::test]
async fn test_crop_outside_closed_set_rejected() {
    let mut entry = valid_entry();
    entry["crop_name"] = json!("Quinoa");

    let (status, _) = send(unreachable_app(), Method::POST, "/api/v1/crops", Some(entry)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// Connectivity Failures
// ============================================================================

#[tokio::test]
async fn test_insert_reports_unreachable_store() {
    let (status, body) = send(
        unreachable_app(),
        Method::POST,
        "/api/v1/crops",
        Some(valid_entry()),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "DATABASE_UNAVAILABLE");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Error connecting to database"));
}

#[tokio::test]
async fn test_bulk_insert_reports_unreachable_store() {
    let (status, body) = send(
        unreachable_app(),
        Method::POST,
        "/api/v1/crops/bulk",
        Some(json!({ "total_records": 1000 })),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "DATABASE_UNAVAILABLE");
}

#[tokio::test]
async fn test_listing_reports_unreachable_store() {
    let (status, body) = send(unreachable_app(), Method::GET, "/api/v1/crops", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "DATABASE_UNAVAILABLE");

    let (status, _) = send(unreachable_app(), Method::GET, "/api/v1/crops/view", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
