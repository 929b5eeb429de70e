//! Application initialization.
//!
//! This module provides functions to initialize shared resources:
//! - HTTP clients (per check, with proxy and timeout applied)
//! - Logger

mod client;
mod logger;

// Re-export public API
pub use client::{init_geo_client, init_redirect_client};
pub use logger::init_logger_with;

/// Loads environment variables from a `.env` file.
///
/// Tries the current directory first, then the directory of the executable.
/// A missing file is not an error.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let env_path = exe_dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
            }
        }
    }
}
