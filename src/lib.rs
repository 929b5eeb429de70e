//! redirect_checker library: redirect chain resolution
//!
//! Follows HTTP redirects (3xx + `Location`) and HTML meta-refresh redirects
//! from a starting URL, recording the status, host, timing and redirect
//! mechanism of every hop.
//!
//! # Example
//!
//! ```no_run
//! use redirect_checker::{resolve_redirects, CheckOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = CheckOptions {
//!     max_hops: 5,
//!     ..Default::default()
//! };
//!
//! let result = resolve_redirects("http://example.com", &options).await?;
//! for hop in &result.hops {
//!     println!("{} {} ({:?})", hop.status, hop.url, hop.redirect_kind);
//! }
//! println!("Final URL: {}", result.final_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
mod checker;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod geo;
pub mod initialization;
mod models;
pub mod server;
pub mod tracking;

// Re-export public API
pub use checker::{resolve_redirects, resolve_redirects_with, RedirectChecker};
pub use config::{CheckOptions, LogFormat, LogLevel, Opt, OutputFormat, ProxySpec};
pub use error_handling::{FetchError, InitializationError, NetworkErrorKind, ProxyParseError};
pub use fetch::{FetchedResponse, ReqwestTransport, Transport};
pub use models::{Hop, RedirectKind, RedirectResult, SimplifiedResult, TerminationReason};
pub use run::run_checks;

// Batch checking used by the binary
mod run {
    use futures::stream::{self, StreamExt};
    use log::info;

    use crate::checker::resolve_redirects;
    use crate::config::CheckOptions;
    use crate::error_handling::InitializationError;
    use crate::models::RedirectResult;

    /// Checks several URLs, at most `concurrency` at a time.
    ///
    /// Results come back in input order. Each check builds its own HTTP client
    /// from `options`, so no connection state is shared between chains.
    pub async fn run_checks(
        urls: Vec<String>,
        options: &CheckOptions,
        concurrency: usize,
    ) -> Vec<(String, Result<RedirectResult, InitializationError>)> {
        info!(
            "Checking {} URL{} (concurrency {})",
            urls.len(),
            if urls.len() == 1 { "" } else { "s" },
            concurrency.max(1)
        );
        stream::iter(urls)
            .map(|url| async move {
                let result = resolve_redirects(&url, options).await;
                (url, result)
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}
