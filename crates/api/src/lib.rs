//! Telemetry API Server
//!
//! HTTP boundary around the cleaner, the log ingestor and the summary
//! aggregator.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use data_validator::Cleaner;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use storage::{Ingestor, LogStore};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod observability;
mod routes;

pub use crate::config::Settings;
pub use crate::error::ApiError;
pub use crate::observability::{init_logging, init_metrics};

/// Application state shared across handlers
pub struct AppState {
    /// Component log store, injected at startup
    pub store: Arc<LogStore>,
    pub ingestor: Ingestor,
    pub cleaner: Cleaner,
    /// Motor temperature alert threshold (°C)
    pub motor_temp_alert: f64,
    /// Prometheus handle, absent when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Create application state around an existing store
    pub fn new(store: Arc<LogStore>, settings: &Settings) -> Self {
        Self {
            store,
            ingestor: Ingestor::default(),
            cleaner: Cleaner::new(settings.cleaner),
            motor_temp_alert: settings.dashboard.motor_temp_alert,
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    /// Attach a Prometheus handle for `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub stored_logs: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/logs/upload", post(routes::logs::upload))
        .route("/logs/summary", get(routes::logs::summary))
        .route("/telemetry/clean", post(routes::telemetry::clean))
        .route("/telemetry/dashboard", post(routes::telemetry::dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        stored_logs: state.store.len(),
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

/// Run the server until interrupted
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let store = Arc::new(LogStore::new());
    let state = AppState::new(store, &settings).with_metrics(init_metrics()?);
    let app = create_router(Arc::new(state));

    info!(
        min_speed = settings.cleaner.min_speed,
        max_speed = settings.cleaner.max_speed,
        "Starting API server on {}",
        settings.server.bind_addr
    );

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
