// Shared test helpers for spinning up local HTTP servers.

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

/// Serves `app` on an ephemeral localhost port and returns its base URL.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://{}", addr)
}

/// Builds a redirect response with an explicit status code.
#[allow(dead_code)] // Used by other test files
pub fn redirect(status: StatusCode, location: &str) -> Response {
    (status, [(header::LOCATION, location.to_string())]).into_response()
}

/// Builds an HTML page with an immediate meta refresh to `target`.
#[allow(dead_code)] // Used by other test files
pub fn meta_refresh_page(target: &str) -> Response {
    (
        [(header::CONTENT_TYPE, "text/html")],
        format!(
            r#"<html><head><meta http-equiv="refresh" content="0;url={target}"></head><body>Moved</body></html>"#
        ),
    )
        .into_response()
}

/// Returns a localhost URL on which nothing is listening.
#[allow(dead_code)] // Used by other test files
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");
    drop(listener);
    format!("http://{}/", addr)
}
