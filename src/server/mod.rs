//! HTTP API for redirect checks.
//!
//! Provides three endpoints:
//! - `/` - plain greeting
//! - `/health` - JSON liveness probe
//! - `/check?url=...` - JSON redirect chain for one URL
//!
//! Requests are independent; each check gets its own HTTP client.

mod handlers;
mod types;

use axum::routing::get;
use axum::Router;

use handlers::{check_handler, health_handler, root_handler};
pub use types::{CheckQuery, ServerState};

/// Builds the API router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/check", get(check_handler))
        .with_state(state)
}

/// Binds `127.0.0.1:port` and serves the API until the process stops.
pub async fn start_server(port: u16, state: ServerState) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to port {}: {}", port, e))?;

    log::info!("API server listening on http://127.0.0.1:{}/", port);
    log::info!("  - Check: http://127.0.0.1:{}/check?url=<url>", port);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}
