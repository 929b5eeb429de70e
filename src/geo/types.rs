//! Geolocation data structures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location reported by the IP-info service.
///
/// Field names follow the service's JSON; everything is optional because the
/// service omits fields it does not know.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoInfo {
    /// Public IP address
    pub ip: Option<String>,
    /// Reverse DNS name
    pub hostname: Option<String>,
    /// City name
    pub city: Option<String>,
    /// Region or state
    pub region: Option<String>,
    /// ISO country code
    pub country: Option<String>,
    /// `"lat,lon"`
    pub loc: Option<String>,
    /// ASN and organisation, e.g. `"AS15169 Google LLC"`
    pub org: Option<String>,
    /// Postal code
    pub postal: Option<String>,
    /// IANA time zone
    pub timezone: Option<String>,
}

impl GeoInfo {
    /// Parses `loc` into latitude and longitude.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = self.loc.as_deref()?.split_once(',')?;
        Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
    }
}

/// Errors from a geolocation lookup.
#[derive(Error, Debug)]
pub enum GeoError {
    /// The lookup URL could not be built.
    #[error("invalid geolocation service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The request failed.
    #[error("geolocation request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("geolocation service returned HTTP {0}")]
    Status(u16),
    /// The body was not the expected JSON.
    #[error("could not decode geolocation response: {0}")]
    Decode(#[from] serde_json::Error),
}
