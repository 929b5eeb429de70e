//! Redirect resolution.
//!
//! - `transport`: one non-redirect-following request per call
//! - `meta_refresh`: finds HTML refresh redirects in a page body
//! - `redirects`: walks the chain hop by hop

pub mod meta_refresh;
pub mod redirects;
pub mod transport;

pub use meta_refresh::detect_meta_refresh;
pub use redirects::resolve_redirect_chain;
pub use transport::{FailedFetch, FetchedResponse, ReqwestTransport, Transport};

#[cfg(test)]
mod tests;
