//! Logging and metrics setup

use crate::config::LogSettings;
use anyhow::{anyhow, Context};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::Level;

pub const LOGS_INGESTED: &str = "telemetry_logs_ingested_total";
pub const BATCHES_REJECTED: &str = "telemetry_batches_rejected_total";
pub const SAMPLES_CLEANED: &str = "telemetry_samples_cleaned_total";
pub const SAMPLES_DROPPED: &str = "telemetry_samples_dropped_total";

/// Install the global tracing subscriber
pub fn init_logging(settings: &LogSettings) -> anyhow::Result<()> {
    let level: Level = settings
        .level
        .parse()
        .with_context(|| format!("invalid log level '{}'", settings.level))?;

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true);

    let installed = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow!("failed to set tracing subscriber: {}", e))
}

/// Install the Prometheus recorder and register metric descriptions
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    describe_counter!(LOGS_INGESTED, "Log entries committed to the store");
    describe_counter!(BATCHES_REJECTED, "Upload batches rejected by validation");
    describe_counter!(SAMPLES_CLEANED, "Telemetry samples returned by the cleaner");
    describe_counter!(SAMPLES_DROPPED, "Telemetry samples removed by the cleaner");

    Ok(handle)
}
