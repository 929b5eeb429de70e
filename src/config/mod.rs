//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - Default request headers and header merging
//! - Per-check options, proxy settings and CLI option types

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{CheckOptions, LogFormat, LogLevel, Opt, OutputFormat, ProxySpec};
