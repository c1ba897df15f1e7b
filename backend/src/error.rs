//! Error handling for the Crop Management Portal
//!
//! Every failure is recovered at the operation boundary and rendered as a
//! single human-readable message; none of them stop the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Storage errors
    #[error("Error connecting to database: {0}")]
    Connectivity(#[source] sqlx::Error),

    #[error("Database statement failed: {0}")]
    Statement(#[from] sqlx::Error),

    #[error("Bulk insert aborted after {inserted} records: {source}")]
    BulkInsertAborted {
        inserted: u64,
        #[source]
        source: sqlx::Error,
    },

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Rows that stayed committed before a bulk insert failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted: Option<u64>,
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Connectivity(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "DATABASE_UNAVAILABLE".to_string(),
                    message: format!("Error connecting to database: {}", e),
                    field: None,
                    inserted: None,
                },
            ),
            AppError::Statement(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "STATEMENT_FAILED".to_string(),
                    message: format!("Error executing database statement: {}", e),
                    field: None,
                    inserted: None,
                },
            ),
            AppError::BulkInsertAborted { inserted, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "BULK_INSERT_ABORTED".to_string(),
                    message: format!(
                        "Bulk insert stopped after {} records were committed: {}",
                        inserted, source
                    ),
                    field: None,
                    inserted: Some(*inserted),
                },
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                    inserted: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for services and handlers
pub type AppResult<T> = Result<T, AppError>;
