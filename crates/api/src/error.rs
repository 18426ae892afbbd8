//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::EntryFailure;
use serde::Serialize;
use serde_json::{json, Value};
use storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Message for an upload body that is not a JSON array
pub const LOGS_NOT_AN_ARRAY: &str = "Request body must be an array of log entries";

/// Message for a cleaning request body that is not a JSON array
pub const SAMPLES_NOT_AN_ARRAY: &str = "Request body must be an array of telemetry samples";

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, unparsable, or not the expected shape
    #[error("{0}")]
    InvalidBody(&'static str),

    /// At least one log entry failed validation
    #[error("Some entries are invalid")]
    InvalidBatch(Vec<EntryFailure>),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Per-entry failure as reported to the uploader
#[derive(Debug, Serialize)]
pub struct FailureDetail {
    pub index: usize,
    pub entry: Value,
    pub reason: String,
}

impl From<&EntryFailure> for FailureDetail {
    fn from(failure: &EntryFailure) -> Self {
        Self {
            index: failure.index,
            entry: failure.entry.clone(),
            reason: failure.reason(),
        }
    }
}

#[derive(Debug, Serialize)]
struct InvalidBatchBody {
    error: String,
    details: Vec<FailureDetail>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::InvalidBody(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::InvalidBatch(failures) => {
                let body = InvalidBatchBody {
                    error: message,
                    details: failures.iter().map(FailureDetail::from).collect(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Storage(e) => {
                error!("Log store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal storage error" })),
                )
                    .into_response()
            }
        }
    }
}
