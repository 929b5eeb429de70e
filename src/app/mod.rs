//! Application helpers shared by the library entry points and the binary.

pub mod report;
pub mod url;

pub use report::{format_result, print_result, print_result_json};
pub use url::{is_fetchable, validate_start_url};
