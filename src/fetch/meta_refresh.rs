//! HTML meta-refresh detection.
//!
//! Finds the target of an immediate `<meta http-equiv="refresh" content="0;url=...">`
//! redirect. Real-world markup is sloppy about quoting, so a fixed list of
//! patterns is tried first and a bounded manual scan catches the rest. Nothing
//! here fails: a tag that cannot be understood simply means "no redirect".

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::config::META_REFRESH_SCAN_LIMIT;

/// Patterns tried in order. All are case-insensitive; the capture is the URL.
const META_REFRESH_PATTERNS: &[&str] = &[
    // http-equiv quoted, content double-quoted
    r#"(?i)<meta\s+http-equiv\s*=\s*["']refresh["']\s+content\s*=\s*"0\s*;\s*url\s*=\s*(.*?)""#,
    // http-equiv quoted, content single-quoted
    r#"(?i)<meta\s+http-equiv\s*=\s*["']refresh["']\s+content\s*=\s*'0\s*;\s*url\s*=\s*(.*?)'"#,
    // http-equiv bare, content double-quoted
    r#"(?i)<meta\s+http-equiv\s*=\s*refresh\s+content\s*=\s*"0\s*;\s*url\s*=\s*(.*?)""#,
    // http-equiv bare, content single-quoted
    r#"(?i)<meta\s+http-equiv\s*=\s*refresh\s+content\s*=\s*'0\s*;\s*url\s*=\s*(.*?)'"#,
    // content bare, runs until whitespace or the end of the tag
    r#"(?i)<meta\s+http-equiv\s*=\s*refresh\s+content\s*=\s*0\s*;\s*url\s*=\s*([^\s>]*)"#,
    r#"(?i)<meta\s+http-equiv\s*=\s*["']refresh["']\s+content\s*=\s*0\s*;\s*url\s*=\s*([^\s>]*)"#,
];

/// Markers of an immediate refresh that make the manual scan worthwhile.
const REFRESH_ZERO_MARKERS: &[&str] = &["content=\"0", "content='0", "content=0"];

/// Characters that end a URL during the manual scan.
const SCAN_TERMINATORS: &[u8] = b"\"' >;";

static COMPILED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    META_REFRESH_PATTERNS
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                debug!("Skipping meta-refresh pattern that failed to compile: {e}");
                None
            }
        })
        .collect()
});

/// Returns the target of an immediate meta-refresh redirect, if the page has one.
///
/// The returned URL may be relative; resolving it is the caller's job. The
/// original case of the URL is preserved.
pub fn detect_meta_refresh(body: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `body`
    let lower = body.to_ascii_lowercase();
    if !lower.contains("meta") || !lower.contains("refresh") {
        return None;
    }

    for re in COMPILED_PATTERNS.iter() {
        if let Some(found) = re.captures(body).and_then(|caps| caps.get(1)) {
            if let Some(url) = clean_candidate(found.as_str()) {
                return Some(url);
            }
        }
    }

    if REFRESH_ZERO_MARKERS.iter().any(|m| lower.contains(m)) {
        return scan_for_url(body, &lower);
    }

    None
}

/// Takes the text after the first `url=` up to the nearest terminator,
/// looking at most `META_REFRESH_SCAN_LIMIT` bytes ahead.
fn scan_for_url(body: &str, lower: &str) -> Option<String> {
    let start = lower.find("url=")? + "url=".len();
    let window_end = (start + META_REFRESH_SCAN_LIMIT).min(lower.len());
    let offset = lower.as_bytes()[start..window_end]
        .iter()
        .position(|b| SCAN_TERMINATORS.contains(b))?;
    // Terminators are ASCII, so start + offset is a char boundary
    clean_candidate(body.get(start..start + offset)?)
}

fn clean_candidate(raw: &str) -> Option<String> {
    let cleaned = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}
