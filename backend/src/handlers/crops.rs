//! Crop record HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crop_shared::{BulkProgress, CropRecord, FormOptions, NewCropRecord, DISPLAY_COLUMNS};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::services::CropRecordService;
use crate::AppState;

/// Request body for a bulk insert
#[derive(Debug, Deserialize)]
pub struct BulkInsertRequest {
    pub total_records: u64,
}

/// Latest bulk-insert progress, polled while a run is in flight
#[derive(Debug, Serialize)]
pub struct BulkProgressView {
    pub progress: Option<BulkProgress>,
    pub complete: bool,
    pub data_version: u64,
}

/// Table view payload
#[derive(Debug, Serialize)]
pub struct CropView {
    pub columns: Vec<&'static str>,
    pub records: Vec<CropRecord>,
    pub limit: u32,
    pub data_version: u64,
}

fn crop_service(state: &AppState) -> CropRecordService {
    CropRecordService::new(state.db.clone(), state.notifier.clone())
        .with_batch_size(state.config.bulk.batch_size)
        .with_max_bulk_records(state.config.bulk.max_records)
}

/// Record a crop observation entered in the form
pub async fn create_crop(
    State(state): State<AppState>,
    Json(input): Json<NewCropRecord>,
) -> impl IntoResponse {
    let service = crop_service(&state);

    match service.insert_one(input).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "record": record,
                "message": "Crop record inserted successfully!",
                "data_version": state.notifier.version(),
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Generate and insert synthetic crop observations
pub async fn bulk_insert_crops(
    State(state): State<AppState>,
    Json(request): Json<BulkInsertRequest>,
) -> impl IntoResponse {
    let service = crop_service(&state);
    let mut progress = Vec::new();

    let result = service
        .insert_bulk(request.total_records, |p| progress.push(p))
        .await;

    match result {
        Ok(summary) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "total_inserted": summary.total_inserted,
                "batches": summary.batches,
                "progress": progress,
                "message": format!("{} records inserted successfully!", summary.total_inserted),
                "data_version": state.notifier.version(),
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Progress of the running or most recent bulk insert
pub async fn get_bulk_progress(State(state): State<AppState>) -> Json<BulkProgressView> {
    let progress = state.notifier.latest_progress();

    Json(BulkProgressView {
        complete: progress.is_some_and(|p| p.is_complete()),
        progress,
        data_version: state.notifier.version(),
    })
}

/// List every crop record in insertion order
pub async fn list_crops(State(state): State<AppState>) -> impl IntoResponse {
    let service = crop_service(&state);

    match service.fetch_all().await {
        Ok(records) => (
            StatusCode::OK,
            Json(serde_json::json!({ "records": records })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// First rows of the table view
pub async fn view_crops(State(state): State<AppState>) -> AppResult<Json<CropView>> {
    let service = crop_service(&state);
    let limit = state.config.view.display_limit;
    let records = service.fetch_first(limit).await?;

    Ok(Json(CropView {
        columns: DISPLAY_COLUMNS.to_vec(),
        records,
        limit,
        data_version: state.notifier.version(),
    }))
}

/// Closed option lists for the entry form
pub async fn get_form_options(State(state): State<AppState>) -> Json<FormOptions> {
    Json(FormOptions::with_presets(state.config.bulk.presets.clone()))
}

/// Current data version, polled by views to know when to re-render
pub async fn get_data_version(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "data_version": state.notifier.version() }))
}
