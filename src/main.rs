//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_checker` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use redirect_checker::app::{print_result, print_result_json};
use redirect_checker::config::GEO_LOOKUP_TIMEOUT;
use redirect_checker::initialization::{init_geo_client, init_logger_with, load_dotenv};
use redirect_checker::server::{start_server, ServerState};
use redirect_checker::tracking::build_tracking_template;
use redirect_checker::{run_checks, Opt, OutputFormat, TerminationReason};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may set REDIRECT_CHECKER_PROXY or IPINFO_TOKEN, so load it before parsing
    load_dotenv();

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let options = opt.check_options().context("Invalid --proxy value")?;

    if let Some(port) = opt.serve {
        return start_server(port, ServerState { defaults: options }).await;
    }

    if opt.geo {
        let client = init_geo_client(options.proxy.as_ref(), GEO_LOOKUP_TIMEOUT)
            .context("Failed to initialize geolocation client")?;
        match redirect_checker::geo::lookup(&client, &opt.geo_url, None, opt.geo_token.as_deref())
            .await
        {
            Ok(info) => println!(
                "Exit location: {} ({}, {}, {})",
                info.ip.as_deref().unwrap_or("?"),
                info.city.as_deref().unwrap_or("?"),
                info.region.as_deref().unwrap_or("?"),
                info.country.as_deref().unwrap_or("?")
            ),
            Err(e) => warn!("Geolocation lookup failed: {e}"),
        }
    }

    let mut any_failed = false;
    for (url, outcome) in run_checks(opt.urls.clone(), &options, opt.concurrency).await {
        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                eprintln!("redirect_checker error for {url}: {e:#}");
                any_failed = true;
                continue;
            }
        };

        match opt.output {
            OutputFormat::Json => {
                print_result_json(&result, opt.simple).context("Failed to serialize result")?
            }
            OutputFormat::Plain => {
                println!("\nChecked: {url}");
                print_result(&result, opt.simple);
            }
        }
        if opt.tracking_template && !result.hops.is_empty() {
            println!(
                "Tracking template: {}",
                build_tracking_template(&result.final_url)
            );
        }

        if matches!(
            result.termination_reason,
            TerminationReason::InvalidInput | TerminationReason::NetworkError
        ) {
            any_failed = true;
        }
    }

    if any_failed {
        process::exit(1);
    }
    Ok(())
}
