//! Request header defaults and merging.
//!
//! Every hop is sent with a browser-like set of headers so that sites serve the
//! same redirects a visitor would see. Callers can override any of them; the
//! merge is rebuilt for every check and never written back into shared state.

use std::collections::HashMap;

use log::warn;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
/// Default Accept header.
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
/// Default Accept-Language header.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
/// Default Connection header.
pub const DEFAULT_CONNECTION: &str = "keep-alive";

/// Returns the built-in default headers as (name, value) pairs.
pub fn default_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("user-agent", DEFAULT_USER_AGENT),
        ("accept", DEFAULT_ACCEPT),
        ("accept-language", DEFAULT_ACCEPT_LANGUAGE),
        ("connection", DEFAULT_CONNECTION),
    ]
}

/// Builds the effective header map for one check.
///
/// Precedence, lowest to highest: built-in defaults, then each layer in the
/// order given. Header names compare case-insensitively, so a later layer's
/// `user-agent` replaces the default `User-Agent`. Names or values that are not
/// valid HTTP tokens are skipped with a warning.
pub fn merge_headers(layers: &[&HashMap<String, String>]) -> HeaderMap {
    let mut merged = HeaderMap::new();
    for (name, value) in default_headers() {
        merged.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    for layer in layers {
        for (name, value) in layer.iter() {
            let Ok(header_name) = HeaderName::from_bytes(name.trim().as_bytes()) else {
                warn!("Skipping invalid header name: {name:?}");
                continue;
            };
            let Ok(header_value) = HeaderValue::from_str(value.trim()) else {
                warn!("Skipping invalid value for header {name}");
                continue;
            };
            merged.insert(header_name, header_value);
        }
    }
    merged
}

/// Parses a `Name: Value` pair as given on the command line.
pub fn parse_header_arg(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
