//! HTTP server bootstrap

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use agrorural_audit::AuditPublisher;
use agrorural_persistence::{connect, SqliteStore};

use crate::{config::ServerConfig, routes::all_routes, state::AppState};

/// Owns the configuration and the store for one server run
pub struct ApiServer {
    config: ServerConfig,
    store: Arc<SqliteStore>,
}

impl ApiServer {
    /// Open the database and apply pending migrations
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let store = connect(&config.database_url)
            .await
            .with_context(|| format!("failed to open database {}", config.database_url))?;
        info!(database_url = %config.database_url, "database ready");

        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    pub fn state(&self) -> AppState {
        let audit = Arc::new(AuditPublisher::new(self.store.clone()));
        AppState::new(self.store.clone(), audit)
            .with_slow_request(self.config.slow_request_threshold())
    }

    /// Serve until Ctrl-C, then close the pool
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.bind_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        info!(%addr, "AgroRural API listening");
        info!("Swagger UI available at http://{}/swagger-ui", addr);

        axum::serve(listener, all_routes(self.state()))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        info!("shutting down");
        self.store.close().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
