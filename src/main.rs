//! # blogscout
//!
//! Discover the blog post URLs of a website from nothing but a human-typed
//! domain name.
//!
//! ## Features
//!
//! - Normalizes raw input into scheme/host candidate variants (`www` toggled,
//!   http and https)
//! - Probes well-known sitemap locations, then the robots.txt `Sitemap:`
//!   directive
//! - Recursively walks sitemap indexes with cycle protection
//! - Filters taxonomy/navigation noise with a substring classifier
//! - Falls back to scraping anchors off the candidate pages when no sitemap
//!   exists anywhere
//!
//! ## Usage
//!
//! ```sh
//! blogscout example.com
//! blogscout example.com -o posts.json
//! ```
//!
//! ## Architecture
//!
//! Discovery is a tiered pipeline:
//! 1. **Resolve**: fan the input out into candidate base URLs
//! 2. **Locate**: existence-probe sitemap paths, then robots.txt, per candidate
//! 3. **Walk**: flatten the sitemap graph into classified post URLs
//! 4. **Fallback**: scrape candidate pages if no sitemap was located
//!
//! Every network failure degrades to an empty contribution; the only
//! observable failure mode is an empty result set.

use clap::Parser;
use serde::Serialize;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod classify;
mod cli;
mod discover;
mod http;
mod robots;
mod scrape;
mod sitemap;
mod variants;

use cli::Cli;
use http::HttpContext;

/// JSON report written by `--json-out`.
#[derive(Debug, Serialize)]
struct DiscoveryReport {
    /// The site input as the user supplied it.
    site: String,
    /// Number of discovered post URLs.
    count: usize,
    /// The discovered post URLs, sorted for stable diffs.
    urls: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("blogscout starting up");

    let args = Cli::parse();
    debug!(?args.site, ?args.sitemap, ?args.timeout_secs, "Parsed CLI arguments");

    let ctx = HttpContext::new(Duration::from_secs(args.timeout_secs))?;

    let posts = match &args.sitemap {
        Some(sitemap_url) => {
            info!(%sitemap_url, "Walking supplied sitemap directly");
            discover::discover_from_sitemap(&ctx, sitemap_url).await
        }
        None => discover::discover(&ctx, &args.site).await,
    };

    if posts.is_empty() {
        warn!(site = %args.site, "No blog posts found");
    }

    // Stable presentation order; set semantics are unchanged.
    let mut urls: Vec<String> = posts.into_iter().collect();
    urls.sort();

    for url in &urls {
        println!("{url}");
    }

    if let Some(json_path) = &args.json_out {
        let report = DiscoveryReport {
            site: args.site.clone(),
            count: urls.len(),
            urls,
        };
        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(json_path, json).await?;
        info!(path = %json_path, count = report.count, "Wrote JSON report");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
