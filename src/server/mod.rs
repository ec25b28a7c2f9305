//! HTTP server
//!
//! Serves the inference pipeline over a small REST API:
//! - `GET /` welcome message
//! - `POST /predict` single prediction
//! - `GET /health` loaded artifacts and uptime

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use handlers::{PredictResponse, WELCOME_MESSAGE};
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use tracing::{error, info};

use crate::artifacts::ArtifactConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifacts: ArtifactConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            artifacts: ArtifactConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// Load artifacts, then serve until ctrl+c.
///
/// Artifacts are loaded before the listener is bound; if loading fails the
/// error is returned and no traffic is ever accepted.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = match AppState::load(&config.artifacts) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!(error = %e, "Failed to load artifacts, refusing to start");
            return Err(e).context("artifact store could not be initialised");
        }
    };

    let addr = config.address()?;
    let app = create_router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        address = %addr,
        model = %state.artifacts.model,
        scaling = %state.artifacts.scaling,
        started_at = %state.started_at.to_rfc3339(),
        pid = std::process::id(),
        "Server listening and ready to accept connections"
    );

    let started_at = state.started_at;
    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install ctrl+c handler");
            std::future::pending::<()>().await;
        }
        let uptime = chrono::Utc::now().signed_duration_since(started_at);
        info!(uptime_secs = uptime.num_seconds(), "Shutdown signal received, stopping server gracefully");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
