//! HTTP and meta-refresh redirect chain resolution.
//!
//! This module follows redirect chains manually to record every hop from the
//! initial URL to the final destination. Each iteration fetches the current
//! URL, records a hop, and decides whether the response points somewhere else.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info, warn};
use reqwest::header::LOCATION;
use reqwest::Url;

use crate::app::{is_fetchable, validate_start_url};
use crate::config::{merge_headers, CheckOptions, HTTP_STATUS_OK};
use crate::fetch::meta_refresh::detect_meta_refresh;
use crate::fetch::transport::{FetchedResponse, Transport};
use crate::models::{Hop, RedirectKind, RedirectResult, TerminationReason};

/// What the walker does after recording a hop.
#[derive(Debug, PartialEq)]
enum Decision {
    Follow { kind: RedirectKind, next: Url },
    Stop { error: Option<String> },
}

/// Resolves the redirect chain for a URL.
///
/// Follows 3xx responses that carry a `Location` header and 200 responses whose
/// body holds an immediate meta refresh. Any other response ends the chain as
/// `Completed`, including 4xx and 5xx. Relative targets are resolved against the
/// URL of the hop that produced them.
///
/// # Arguments
///
/// * `start_url` - The initial URL to start from
/// * `options` - Header overrides, hop limit and overall deadline
/// * `extra_headers` - Per-call headers, applied on top of `options.headers`
/// * `transport` - Performs one non-redirect-following request per hop
///
/// # Returns
///
/// The recorded hops and why the walk stopped. Network failures are recorded
/// on the last hop rather than returned as errors.
pub async fn resolve_redirect_chain(
    start_url: &str,
    options: &CheckOptions,
    extra_headers: &HashMap<String, String>,
    transport: &dyn Transport,
) -> RedirectResult {
    let Some(mut current) = validate_start_url(start_url) else {
        return RedirectResult::new(Vec::new(), start_url, TerminationReason::InvalidInput);
    };

    let headers = merge_headers(&[&options.headers, extra_headers]);
    let max_hops = options.max_hops;
    let started = Instant::now();
    let mut hops: Vec<Hop> = Vec::new();
    // The first hop records the caller's string; later hops record resolved targets
    let mut recorded_url = start_url.to_string();

    loop {
        if hops.len() >= max_hops {
            info!(
                "Hop limit of {max_hops} reached for {start_url}, next would be {current}"
            );
            return RedirectResult::new(hops, start_url, TerminationReason::HopLimitReached);
        }
        if let Some(deadline) = options.deadline {
            if started.elapsed() >= deadline {
                info!(
                    "Deadline of {:.1}s expired for {start_url} after {} hops",
                    deadline.as_secs_f64(),
                    hops.len()
                );
                return RedirectResult::new(hops, start_url, TerminationReason::Cancelled);
            }
        }

        let host = current.host_str().unwrap_or_default().to_string();
        let response = match transport.fetch(&current, &headers).await {
            Ok(response) => response,
            Err(failed) => {
                warn!("Hop {} to {current} failed: {}", hops.len() + 1, failed.error);
                hops.push(Hop {
                    url: recorded_url,
                    host,
                    status: 0,
                    status_text: String::new(),
                    duration_ms: failed.elapsed.as_secs_f64() * 1000.0,
                    redirect_kind: RedirectKind::None,
                    next_location: None,
                    error: Some(failed.error.to_string()),
                });
                return RedirectResult::new(hops, start_url, TerminationReason::NetworkError);
            }
        };

        let decision = decide(&current, &response);
        let (redirect_kind, next_location, error) = match &decision {
            Decision::Follow { kind, next } => (*kind, Some(next.to_string()), None),
            Decision::Stop { error } => (RedirectKind::None, None, error.clone()),
        };
        debug!(
            "Hop {}: {} {} ({:?}) in {:.1}ms",
            hops.len() + 1,
            response.status,
            current,
            redirect_kind,
            response.elapsed.as_secs_f64() * 1000.0
        );
        hops.push(Hop {
            url: std::mem::take(&mut recorded_url),
            host,
            status: response.status,
            status_text: response.reason,
            duration_ms: response.elapsed.as_secs_f64() * 1000.0,
            redirect_kind,
            next_location,
            error,
        });

        match decision {
            Decision::Follow { next, .. } => {
                recorded_url = next.to_string();
                current = next;
            }
            Decision::Stop { .. } => {
                info!(
                    "Resolved {start_url} -> {current} in {} hops",
                    hops.len()
                );
                return RedirectResult::new(hops, start_url, TerminationReason::Completed);
            }
        }
    }
}

/// Classifies a response and resolves its redirect target, if any.
fn decide(current: &Url, response: &FetchedResponse) -> Decision {
    let target = if (300..400).contains(&response.status) {
        response.headers.get(LOCATION).map(|value| {
            (
                RedirectKind::Http,
                String::from_utf8_lossy(value.as_bytes()).trim().to_string(),
            )
        })
    } else if response.status == HTTP_STATUS_OK {
        response
            .body
            .as_deref()
            .and_then(detect_meta_refresh)
            .map(|url| (RedirectKind::MetaRefresh, url))
    } else {
        None
    };

    let Some((kind, raw)) = target else {
        if (300..400).contains(&response.status) {
            warn!(
                "Redirect status {} for {current} but no Location header",
                response.status
            );
        }
        return Decision::Stop { error: None };
    };

    // join passes absolute URLs through unchanged
    match current.join(&raw) {
        Ok(next) if is_fetchable(&next) => Decision::Follow { kind, next },
        Ok(next) => {
            warn!("Not following {kind:?} redirect from {current} to unfetchable target {next}");
            Decision::Stop {
                error: Some(format!("unsupported redirect target: {next}")),
            }
        }
        Err(e) => {
            warn!("Could not resolve {kind:?} redirect {raw:?} from {current}: {e}");
            Decision::Stop {
                error: Some(format!("unresolvable redirect target {raw:?}: {e}")),
            }
        }
    }
}
