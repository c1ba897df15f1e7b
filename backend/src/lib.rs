//! Crop Management Portal - Backend
//!
//! Records crop observations into PostgreSQL and serves them back to the
//! entry form and table view.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use db::ConnectionProvisioner;
pub use error::{AppError, AppResult};
pub use services::{ChangeNotifier, CropRecordService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: ConnectionProvisioner,
    pub notifier: ChangeNotifier,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            db: ConnectionProvisioner::new(&config.database),
            notifier: ChangeNotifier::new(),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "My Crop Management Portal API v1.0"
}
