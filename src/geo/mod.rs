//! Geolocation lookup.
//!
//! A single HTTP call to an IP-info service. It is independent of the redirect
//! walk; callers combine the two, typically to show where a proxied check
//! appeared to come from.

mod lookup;
mod types;

// Re-export public API
pub use lookup::{lookup, lookup_url};
pub use types::{GeoError, GeoInfo};
