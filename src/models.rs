//! Redirect check results.
//!
//! `RedirectResult` is the canonical record of one check. The simplified view,
//! the host chain and the printable chain are projections of its hops and never
//! trigger another walk.

use std::fmt;

use serde::Serialize;

/// How a hop led to the next URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectKind {
    /// The hop did not redirect
    None,
    /// 3xx status with a `Location` header
    Http,
    /// `<meta http-equiv="refresh">` in a 200 body
    MetaRefresh,
}

/// Why the walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// A non-redirecting response was reached (including 4xx/5xx)
    Completed,
    /// The hop limit was reached while the chain was still redirecting
    HopLimitReached,
    /// A fetch failed; the failure is recorded on the last hop
    NetworkError,
    /// The starting URL was not a usable http(s) URL
    InvalidInput,
    /// The overall deadline expired before the next fetch
    Cancelled,
}

impl TerminationReason {
    /// Stable snake_case label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::Completed => "completed",
            TerminationReason::HopLimitReached => "hop_limit_reached",
            TerminationReason::NetworkError => "network_error",
            TerminationReason::InvalidInput => "invalid_input",
            TerminationReason::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fetch-and-classify step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hop {
    /// URL requested in this hop
    pub url: String,
    /// Host of `url`
    pub host: String,
    /// HTTP status, or 0 when the fetch failed
    pub status: u16,
    /// Canonical reason phrase for `status`
    pub status_text: String,
    /// Time spent on the fetch in milliseconds
    pub duration_ms: f64,
    /// Redirect mechanism that produced `next_location`
    pub redirect_kind: RedirectKind,
    /// Absolute URL of the next hop
    pub next_location: Option<String>,
    /// Failure description for a failed or unfollowable hop
    pub error: Option<String>,
}

/// Outcome of one redirect check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedirectResult {
    /// Hops in fetch order
    pub hops: Vec<Hop>,
    /// URL of the last hop (the raw input when there are no hops)
    pub final_url: String,
    /// Why the walk stopped
    pub termination_reason: TerminationReason,
}

/// Path-only view of a `RedirectResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimplifiedResult {
    /// Every requested URL, in order
    pub path: Vec<String>,
    /// Last URL in `path`
    pub final_url: String,
}

impl RedirectResult {
    pub(crate) fn new(
        hops: Vec<Hop>,
        start_url: &str,
        termination_reason: TerminationReason,
    ) -> Self {
        let final_url = hops
            .last()
            .map_or_else(|| start_url.to_string(), |hop| hop.url.clone());
        Self {
            hops,
            final_url,
            termination_reason,
        }
    }

    /// Projects the hops onto a URL path plus final URL.
    pub fn simplified(&self) -> SimplifiedResult {
        SimplifiedResult {
            path: self.hops.iter().map(|hop| hop.url.clone()).collect(),
            final_url: self.final_url.clone(),
        }
    }

    /// Hosts visited, in order.
    pub fn host_chain(&self) -> Vec<&str> {
        self.hops.iter().map(|hop| hop.host.as_str()).collect()
    }

    /// Number of hops that redirected somewhere else.
    pub fn redirect_count(&self) -> usize {
        self.hops
            .iter()
            .filter(|hop| hop.redirect_kind != RedirectKind::None)
            .count()
    }

    /// Total time spent fetching, in milliseconds.
    pub fn total_duration_ms(&self) -> f64 {
        self.hops.iter().map(|hop| hop.duration_ms).sum()
    }
}

impl fmt::Display for RedirectResult {
    /// Renders the URL chain as `a -> b -> c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hops.is_empty() {
            return f.write_str(&self.final_url);
        }
        for (i, hop) in self.hops.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(&hop.url)?;
        }
        Ok(())
    }
}
