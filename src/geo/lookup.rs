//! Geolocation lookup against an IP-info style JSON service.

use log::debug;
use reqwest::Url;

use super::types::{GeoError, GeoInfo};

/// Builds `{base}/{ip}/json`, or `{base}/json` to ask about the caller's own address.
pub fn lookup_url(base_url: &str, ip: Option<&str>, token: Option<&str>) -> Result<Url, GeoError> {
    let base = base_url.trim_end_matches('/');
    let mut url = match ip.map(str::trim).filter(|ip| !ip.is_empty()) {
        Some(ip) => Url::parse(&format!("{base}/{ip}/json"))?,
        None => Url::parse(&format!("{base}/json"))?,
    };
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        url.query_pairs_mut().append_pair("token", token);
    }
    Ok(url)
}

/// Looks up the location of `ip`, or of the address the request leaves from.
///
/// When the client is configured with a proxy and `ip` is `None`, the result
/// describes the proxy's exit address.
///
/// # Errors
///
/// Returns `GeoError` if the request fails, the service answers with a
/// non-success status, or the body is not valid JSON.
pub async fn lookup(
    client: &reqwest::Client,
    base_url: &str,
    ip: Option<&str>,
    token: Option<&str>,
) -> Result<GeoInfo, GeoError> {
    let url = lookup_url(base_url, ip, token)?;
    debug!("Geolocation lookup: {}", url.path());

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(GeoError::Status(status.as_u16()));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
