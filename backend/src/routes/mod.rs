//! Route definitions for the Crop Management Portal

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Crop records
        .nest("/crops", crop_routes())
}

/// Crop record routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops).post(handlers::create_crop))
        .route("/bulk", post(handlers::bulk_insert_crops))
        .route("/bulk/progress", get(handlers::get_bulk_progress))
        .route("/view", get(handlers::view_crops))
        .route("/options", get(handlers::get_form_options))
        .route("/changes", get(handlers::get_data_version))
}
