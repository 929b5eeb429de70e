//! HTTP client initialization.
//!
//! Each check gets its own client so that proxy settings never leak between
//! checks running side by side.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::ProxySpec;
use crate::error_handling::InitializationError;

/// Initializes an HTTP client for redirect resolution.
///
/// Creates a `reqwest::Client` with redirects disabled so we can manually track
/// the redirect chain, the per-hop timeout applied to every request, and the
/// optional proxy applied to every scheme. No default headers are installed;
/// the walker sends its merged header map with each request.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the proxy URL is rejected
/// by reqwest or the client cannot be built.
pub fn init_redirect_client(
    proxy: Option<&ProxySpec>,
    timeout: Duration,
) -> Result<reqwest::Client, InitializationError> {
    let mut builder = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .connect_timeout(timeout);

    builder = match proxy {
        Some(spec) => builder.proxy(reqwest::Proxy::all(spec.to_url_string())?),
        // Only an explicit proxy is used; HTTP_PROXY and friends are ignored
        None => builder.no_proxy(),
    };

    Ok(builder.build()?)
}

/// Initializes the client used for geolocation lookups.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the client cannot be built.
pub fn init_geo_client(
    proxy: Option<&ProxySpec>,
    timeout: Duration,
) -> Result<reqwest::Client, InitializationError> {
    let mut builder = ClientBuilder::new().timeout(timeout);
    if let Some(spec) = proxy {
        builder = builder.proxy(reqwest::Proxy::all(spec.to_url_string())?);
    }
    Ok(builder.build()?)
}
