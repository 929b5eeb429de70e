//! Error categorization.
//!
//! Maps `reqwest::Error` values onto `NetworkErrorKind` and builds the message
//! recorded on a failed hop.

use std::error::Error as StdError;

use super::types::{FetchError, NetworkErrorKind};

/// Categorizes a `reqwest::Error` into a `NetworkErrorKind`.
///
/// reqwest reports DNS and TLS failures as connect errors, so the source chain is
/// inspected for resolver and handshake messages before falling back to the
/// coarse reqwest flags.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> NetworkErrorKind {
    if error.is_timeout() {
        return NetworkErrorKind::Timeout;
    }

    // Sources only: the top-level message embeds the URL, whose host may contain "ssl" or "tls"
    let chain = error
        .source()
        .map(error_chain_text)
        .unwrap_or_default()
        .to_lowercase();
    if chain.contains("dns error")
        || chain.contains("failed to lookup address")
        || chain.contains("name or service not known")
        || chain.contains("no such host")
    {
        NetworkErrorKind::Dns
    } else if chain.contains("certificate")
        || chain.contains("tls")
        || chain.contains("ssl")
        || chain.contains("handshake")
    {
        NetworkErrorKind::Tls
    } else if error.is_connect() {
        NetworkErrorKind::Connect
    } else if error.is_body() || error.is_decode() {
        NetworkErrorKind::Body
    } else if error.is_builder() || error.is_request() {
        NetworkErrorKind::Request
    } else {
        NetworkErrorKind::Other
    }
}

/// Converts a transport error into the `FetchError` stored on a hop.
pub fn fetch_error_from_reqwest(error: &reqwest::Error) -> FetchError {
    FetchError::new(categorize_reqwest_error(error), error_chain_text(error))
}

/// Joins an error and all of its sources into one line.
pub fn error_chain_text(error: &(dyn StdError + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
