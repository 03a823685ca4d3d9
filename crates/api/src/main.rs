//! Visa Processing Time Estimator - Main Entry Point

use api::{logging::init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("=== Visa Processing Time Estimator v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Model artifact: {}", config.model.path.display());

    run_server(config).await
}
