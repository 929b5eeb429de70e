//! Error handling.
//!
//! This module provides:
//! - Error type definitions for initialization, proxy parsing and fetching
//! - Categorization of transport errors into network failure kinds
//!
//! Network failures never escape a check: the walker records them on a terminal
//! hop. The types here describe them and the setup errors that happen before a
//! check starts.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, error_chain_text, fetch_error_from_reqwest};
pub use types::{FetchError, InitializationError, NetworkErrorKind, ProxyParseError};
