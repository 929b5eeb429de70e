//! Public entry points for redirect checks.

use std::collections::HashMap;

use crate::config::CheckOptions;
use crate::error_handling::InitializationError;
use crate::fetch::{resolve_redirect_chain, ReqwestTransport, Transport};
use crate::models::RedirectResult;

/// Resolves the redirect chain of `url` over a fresh HTTP client.
///
/// The client is built from `options` (proxy and per-hop timeout) and dropped
/// when the check ends, so concurrent checks never share connection or proxy
/// state.
///
/// # Errors
///
/// Returns `InitializationError` only if the HTTP client cannot be built.
/// Invalid input and network failures are reported inside the `RedirectResult`.
///
/// # Example
///
/// ```no_run
/// use redirect_checker::{resolve_redirects, CheckOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let result = resolve_redirects("https://example.com", &CheckOptions::default()).await?;
/// println!("{} ({})", result.final_url, result.termination_reason);
/// # Ok(())
/// # }
/// ```
pub async fn resolve_redirects(
    url: &str,
    options: &CheckOptions,
) -> Result<RedirectResult, InitializationError> {
    let transport = ReqwestTransport::from_options(options)?;
    Ok(resolve_redirects_with(url, options, &transport).await)
}

/// Resolves the redirect chain of `url` over the given transport.
pub async fn resolve_redirects_with(
    url: &str,
    options: &CheckOptions,
    transport: &dyn Transport,
) -> RedirectResult {
    resolve_redirect_chain(url, options, &HashMap::new(), transport).await
}

/// Reusable checker with a fixed set of base options.
///
/// Per-call headers are layered over the base headers for that call only; the
/// checker itself is never modified by a check.
#[derive(Debug, Clone, Default)]
pub struct RedirectChecker {
    options: CheckOptions,
}

impl RedirectChecker {
    /// Creates a checker with the given base options.
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    /// Base options applied to every check.
    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Checks `url`, sending `extra_headers` on top of the base headers.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` only if the HTTP client cannot be built.
    pub async fn check(
        &self,
        url: &str,
        extra_headers: &HashMap<String, String>,
    ) -> Result<RedirectResult, InitializationError> {
        let transport = ReqwestTransport::from_options(&self.options)?;
        Ok(self.check_with(url, extra_headers, &transport).await)
    }

    /// Like [`RedirectChecker::check`] but over a caller-supplied transport.
    pub async fn check_with(
        &self,
        url: &str,
        extra_headers: &HashMap<String, String>,
        transport: &dyn Transport,
    ) -> RedirectResult {
        resolve_redirect_chain(url, &self.options, extra_headers, transport).await
    }
}
