//! Component Log Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use metrics::counter;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use storage::IngestOutcome;

use aggregator::{summarize_store, Summary};

use crate::error::{ApiError, LOGS_NOT_AN_ARRAY};
use crate::observability::{BATCHES_REJECTED, LOGS_INGESTED};
use crate::AppState;

/// Response for a committed upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
}

/// Validate and commit a batch of log entries, all or nothing
pub async fn upload(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let entries = match payload {
        Ok(Json(Value::Array(entries))) => entries,
        _ => return Err(ApiError::InvalidBody(LOGS_NOT_AN_ARRAY)),
    };

    match state.ingestor.ingest(&state.store, &entries)? {
        IngestOutcome::Committed { appended } => {
            counter!(LOGS_INGESTED).increment(appended as u64);
            Ok(Json(UploadResponse {
                message: format!("{} logs uploaded successfully", appended),
            }))
        }
        IngestOutcome::Rejected { failures } => {
            counter!(BATCHES_REJECTED).increment(1);
            Err(ApiError::InvalidBatch(failures))
        }
    }
}

/// Summary statistics over every stored entry
pub async fn summary(State(state): State<Arc<AppState>>) -> Result<Json<Summary>, ApiError> {
    Ok(Json(summarize_store(&state.store)?))
}
