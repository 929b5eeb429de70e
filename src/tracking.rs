//! Tracking-template construction.
//!
//! Ad platforms take a template whose landing page is the `{lpurl}` placeholder
//! and which carries the original query parameters. The template is derived
//! purely from an already resolved final URL.

/// Placeholder the ad platform replaces with the landing page URL.
pub const LPURL_PLACEHOLDER: &str = "{lpurl}";

/// Splits a URL into the part before `?` and the query after it.
///
/// The fragment is dropped. Returns `None` for the query when there is none or
/// it is empty.
pub fn split_final_url(final_url: &str) -> (&str, Option<&str>) {
    let without_fragment = final_url.split('#').next().unwrap_or(final_url);
    match without_fragment.split_once('?') {
        Some((base, query)) if !query.is_empty() => (base, Some(query)),
        Some((base, _)) => (base, None),
        None => (without_fragment, None),
    }
}

/// Builds a tracking template from a final URL.
///
/// `https://shop.example/p?utm_source=x&id=7` becomes `{lpurl}?utm_source=x&id=7`;
/// a URL without a query becomes `{lpurl}`.
pub fn build_tracking_template(final_url: &str) -> String {
    match split_final_url(final_url.trim()) {
        (_, Some(query)) => format!("{LPURL_PLACEHOLDER}?{query}"),
        (_, None) => LPURL_PLACEHOLDER.to_string(),
    }
}
