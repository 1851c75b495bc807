//! Folio API Server
//!
//! Serves portfolio content read from YAML section files, plus health,
//! metrics and LeetCode stats endpoints.
//!
//! # Architecture
//!
//! - **Routes**: HTTP endpoint definitions and handlers
//! - **Services**: outbound integrations
//! - **Middleware**: request ids, security headers, logging, metrics, CORS
//! - **Config**: layered `ServerConfig` and its validation

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod monitoring;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod validate;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use validate::ContentValidation;

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Server builder for constructing and running the API server.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a new server with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self, anyhow::Error> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Run the server, binding to the configured address.
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr).await?;

        info!(
            addr = %addr,
            mode = %self.config.mode(),
            content_dir = %self.config.content.dir.display(),
            "Server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    /// Get the server's socket address.
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.config.socket_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
