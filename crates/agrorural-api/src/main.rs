//! AgroRural API server entry point

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use agrorural_api::{ApiServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        host = %config.host,
        port = config.port,
        "Starting AgroRural API..."
    );

    let server = ApiServer::new(config).await?;
    match server.run().await {
        Ok(()) => {
            tracing::info!("server exited gracefully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("server error: {:#}", e);
            Err(e)
        }
    }
}
