//! HTTP API handlers.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::{CheckQuery, ErrorResponse, HealthResponse, ServerState};
use crate::checker::resolve_redirects;
use crate::config::{CheckOptions, ProxySpec};
use crate::models::TerminationReason;

pub async fn root_handler() -> &'static str {
    "Hello, World!"
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Resolves the redirect chain of `?url=` and returns it as JSON.
///
/// Invalid start URLs answer 400 with the (empty) result so clients see the
/// termination reason; every other outcome, including network failures, is 200.
pub async fn check_handler(
    State(state): State<ServerState>,
    Query(query): Query<CheckQuery>,
) -> Response {
    let options = match options_for(&state.defaults, &query) {
        Ok(options) => options,
        Err(error) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
        }
    };

    let result = match resolve_redirects(&query.url, &options).await {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Could not start check for {}: {e}", query.url);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let status = if result.termination_reason == TerminationReason::InvalidInput {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };
    if query.simple {
        (status, Json(result.simplified())).into_response()
    } else {
        (status, Json(result)).into_response()
    }
}

/// Applies the query overrides to a copy of the server defaults.
fn options_for(defaults: &CheckOptions, query: &CheckQuery) -> Result<CheckOptions, String> {
    let mut options = defaults.clone();
    if let Some(max_hops) = query.max_hops {
        if max_hops == 0 {
            return Err("max_hops must be at least 1".to_string());
        }
        options.max_hops = max_hops;
    }
    if let Some(timeout) = query.timeout {
        if timeout == 0 {
            return Err("timeout must be at least 1 second".to_string());
        }
        options.timeout_per_hop = Duration::from_secs(timeout);
    }
    if let Some(deadline) = query.deadline {
        options.deadline = Some(Duration::from_secs(deadline));
    }
    if let Some(proxy) = query.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        options.proxy = Some(proxy.parse::<ProxySpec>().map_err(|e| e.to_string())?);
    }
    Ok(options)
}
