//! Command-line interface definitions for blogscout.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The discovery core itself takes no configuration beyond the timeout; the
//! flags here are the thin presentation layer around it.

use clap::Parser;

/// Command-line arguments for the blogscout application.
///
/// # Examples
///
/// ```sh
/// # Discover blog posts for a bare domain
/// blogscout example.com
///
/// # Walk a known sitemap directly, skipping location search
/// blogscout example.com --sitemap https://example.com/sitemap_index.xml
///
/// # Write the result as a JSON report
/// blogscout example.com -o posts.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Website URL or bare domain to discover blog posts for
    pub site: String,

    /// Walk this sitemap URL directly instead of searching for one
    #[arg(short, long)]
    pub sitemap: Option<String>,

    /// Write the discovered URLs to this path as a JSON report
    #[arg(short = 'o', long = "json-out")]
    pub json_out: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = crate::http::DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}
