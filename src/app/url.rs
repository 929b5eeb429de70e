//! URL validation utilities.

use log::warn;
use reqwest::Url;

use crate::config::MAX_URL_LENGTH;

/// Validates the starting URL of a check.
///
/// The URL must parse on its own (no base) and pass [`is_fetchable`]. Unlike
/// redirect targets, the starting URL is never completed or resolved against
/// anything.
///
/// # Returns
///
/// `Some(url)` if the URL can be fetched, `None` otherwise.
pub fn validate_start_url(url: &str) -> Option<Url> {
    let trimmed = url.trim();
    if trimmed.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {})",
            trimmed.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match Url::parse(trimmed) {
        Ok(parsed) => {
            if !is_fetchable(&parsed) {
                warn!("Rejecting URL without http(s) scheme or host, or too long: {trimmed}");
                return None;
            }
            Some(parsed)
        }
        Err(e) => {
            warn!("Rejecting invalid URL {trimmed:?}: {e}");
            None
        }
    }
}

/// Whether the walker can issue a request for `url`.
///
/// Applies to start URLs and redirect targets alike: http or https scheme, a
/// non-empty host, and at most `MAX_URL_LENGTH` bytes once serialized.
pub fn is_fetchable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some_and(|h| !h.is_empty())
        && url.as_str().len() <= MAX_URL_LENGTH
}
