//! User-facing output for check results.

use colored::*;

use crate::models::{RedirectKind, RedirectResult, TerminationReason};

/// Renders a result as text: URL chain, host chain and one line per hop.
///
/// With `simple`, only the path and the final URL are rendered.
pub fn format_result(result: &RedirectResult, simple: bool) -> String {
    let mut out = String::new();
    if simple {
        let view = result.simplified();
        out.push_str(&format!("Redirect path: {}\n", view.path.join(" -> ")));
        out.push_str(&format!("Final URL: {}\n", view.final_url));
        return out;
    }

    out.push_str("URL chain:\n");
    out.push_str(&result.hops.iter().map(|h| h.url.as_str()).collect::<Vec<_>>().join(" ->\n"));
    out.push_str("\n\nHost chain:\n");
    out.push_str(&result.host_chain().join(" -> "));
    out.push_str("\n\n");

    for (i, hop) in result.hops.iter().enumerate() {
        let status = if hop.status == 0 {
            "ERR".red().to_string()
        } else if hop.status >= 400 {
            hop.status.to_string().yellow().to_string()
        } else {
            hop.status.to_string().green().to_string()
        };
        let via = match hop.redirect_kind {
            RedirectKind::Http => " [http]",
            RedirectKind::MetaRefresh => " [meta-refresh]",
            RedirectKind::None => "",
        };
        out.push_str(&format!(
            "{:>2}. {} {} ({:.0}ms){}\n",
            i + 1,
            status,
            hop.url,
            hop.duration_ms,
            via
        ));
        if let Some(error) = &hop.error {
            out.push_str(&format!("    {}\n", error.red()));
        }
    }

    let reason = match result.termination_reason {
        TerminationReason::Completed => result.termination_reason.to_string().green(),
        _ => result.termination_reason.to_string().yellow(),
    };
    out.push_str(&format!("Final URL: {} ({})\n", result.final_url, reason));
    out
}

/// Prints a result as text to stdout.
pub fn print_result(result: &RedirectResult, simple: bool) {
    print!("{}", format_result(result, simple));
}

/// Prints a result (or its simplified view) as one JSON document.
pub fn print_result_json(result: &RedirectResult, simple: bool) -> serde_json::Result<()> {
    let json = if simple {
        serde_json::to_string(&result.simplified())?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
