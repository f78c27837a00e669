pub mod api;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;

use std::{net::SocketAddr, sync::Arc};

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::CorsLayer;
use tracing::info;

pub use completion::{CompletionClient, OpenAiClient, UpstreamError};
pub use config::{AppConfig, ConfigError};
pub use error::AppError;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }
}

pub fn build_app(state: AppState, body_limit_bytes: usize) -> Router {
    api::router(state)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CorsLayer::permissive())
}

pub async fn run_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
