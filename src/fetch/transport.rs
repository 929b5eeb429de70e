//! Single-request HTTP fetcher.
//!
//! A `Transport` performs exactly one request per call and never follows
//! redirects. The walker depends on the trait only, so tests can script
//! responses without touching the network.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::Url;

use crate::config::{CheckOptions, HTTP_STATUS_OK, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::{fetch_error_from_reqwest, FetchError, InitializationError};
use crate::initialization::init_redirect_client;

/// Response to a single non-redirect-following request.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase (empty for unknown codes)
    pub reason: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Body text, present only for 200 responses
    pub body: Option<String>,
    /// Time from sending the request to finishing the body read
    pub elapsed: Duration,
}

/// A fetch that failed, with the time spent before it failed.
#[derive(Debug, Clone)]
pub struct FailedFetch {
    /// Categorized cause
    pub error: FetchError,
    /// Time spent before the failure
    pub elapsed: Duration,
}

/// Capability to perform one GET without following redirects.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one GET for `url` with exactly the given headers.
    async fn fetch(&self, url: &Url, headers: &HeaderMap) -> Result<FetchedResponse, FailedFetch>;
}

/// `Transport` backed by a dedicated `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with the proxy and per-hop timeout of `options`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` if the client cannot be built.
    pub fn from_options(options: &CheckOptions) -> Result<Self, InitializationError> {
        let client = init_redirect_client(options.proxy.as_ref(), options.timeout_per_hop)?;
        Ok(Self { client })
    }

    /// Wraps an existing client. The client must have redirects disabled.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &Url, headers: &HeaderMap) -> Result<FetchedResponse, FailedFetch> {
        let start = Instant::now();
        let failed = |e: &reqwest::Error| FailedFetch {
            error: fetch_error_from_reqwest(e),
            elapsed: start.elapsed(),
        };

        let mut response = self
            .client
            .get(url.clone())
            .headers(headers.clone())
            .send()
            .await
            .map_err(|e| failed(&e))?;

        let status = response.status();
        let response_headers = response.headers().clone();

        // Redirect detection only needs the body of 200 responses
        let body = if status.as_u16() == HTTP_STATUS_OK {
            let mut bytes: Vec<u8> = Vec::new();
            while let Some(chunk) = response.chunk().await.map_err(|e| failed(&e))? {
                let room = MAX_RESPONSE_BODY_SIZE - bytes.len();
                if chunk.len() >= room {
                    bytes.extend_from_slice(&chunk[..room]);
                    debug!("Truncated body of {url} at {MAX_RESPONSE_BODY_SIZE} bytes");
                    break;
                }
                bytes.extend_from_slice(&chunk);
            }
            Some(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            None
        };

        Ok(FetchedResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers: response_headers,
            body,
            elapsed: start.elapsed(),
        })
    }
}
