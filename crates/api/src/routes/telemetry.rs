//! Telemetry Cleaning Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use data_validator::{CleanSample, DashboardReadout, RawSample};
use metrics::counter;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ApiError, SAMPLES_NOT_AN_ARRAY};
use crate::observability::{SAMPLES_CLEANED, SAMPLES_DROPPED};
use crate::AppState;

fn raw_samples(payload: Result<Json<Value>, JsonRejection>) -> Result<Vec<RawSample>, ApiError> {
    match payload {
        Ok(Json(Value::Array(items))) => Ok(items.iter().map(RawSample::from_value).collect()),
        _ => Err(ApiError::InvalidBody(SAMPLES_NOT_AN_ARRAY)),
    }
}

fn clean_counted(state: &AppState, raw: &[RawSample]) -> Vec<CleanSample> {
    let (samples, stats) = state.cleaner.clean_with_stats(raw);
    counter!(SAMPLES_CLEANED).increment(samples.len() as u64);
    counter!(SAMPLES_DROPPED).increment(stats.dropped() as u64);
    samples
}

/// Clean a run of raw samples
pub async fn clean(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<CleanSample>>, ApiError> {
    let raw = raw_samples(payload)?;
    Ok(Json(clean_counted(&state, &raw)))
}

/// Clean a run and project it into the dashboard readout
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DashboardReadout>, ApiError> {
    let raw = raw_samples(payload)?;
    let samples = clean_counted(&state, &raw);
    Ok(Json(DashboardReadout::from_samples(
        &samples,
        state.motor_temp_alert,
    )))
}
