//! Sitemap location via the robots.txt `Sitemap:` directive.
//!
//! When no sitemap answers at a well-known path, robots.txt is the next
//! authority: the robots exclusion format allows sites to declare sitemap
//! locations with `Sitemap: <url>` lines. Only the first directive is used;
//! large sites sometimes list several, but one is enough to seed the walk.
//!
//! A missing or unreachable robots.txt is not an error, it simply means
//! "no directive" and the orchestrator moves on.

use crate::http::{FetchOutcome, HttpContext};
use tracing::{debug, info, instrument};
use url::Url;

/// Scan robots.txt content for the first `Sitemap:` directive.
///
/// Matching is case-sensitive on the directive name, per the common
/// convention. The value after the colon is trimmed; an empty value counts
/// as no directive.
pub fn sitemap_directive(body: &str) -> Option<String> {
    body.lines()
        .filter_map(|line| line.strip_prefix("Sitemap:"))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Fetch a robots.txt resource and extract its first `Sitemap:` directive.
///
/// Any fetch failure is reported as `None`, never as an error.
#[instrument(level = "debug", skip(ctx), fields(%robots_url))]
pub async fn sitemap_from_robots(ctx: &HttpContext, robots_url: &Url) -> Option<String> {
    match ctx.fetch_text(robots_url.as_str()).await {
        FetchOutcome::Body(body) => {
            let directive = sitemap_directive(&body);
            match &directive {
                Some(sitemap_url) => info!(%sitemap_url, "robots.txt declares a sitemap"),
                None => debug!("robots.txt has no Sitemap directive"),
            }
            directive
        }
        FetchOutcome::Missing(status) => {
            debug!(%status, "robots.txt not present");
            None
        }
        FetchOutcome::Unreachable(reason) => {
            debug!(%reason, "robots.txt unreachable");
            None
        }
    }
}
