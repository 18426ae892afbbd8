//! Telemetry Service - Main Entry Point

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_logging(&settings.log)?;

    info!("=== Telemetry Service v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(settings).await
}
