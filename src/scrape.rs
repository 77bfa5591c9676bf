//! Best-effort HTML fallback scraping for sites without a sitemap.
//!
//! When no sitemap can be located anywhere, the last resort is to fetch each
//! candidate base page, collect every anchor's `href`, and keep the ones the
//! classifier accepts. Relative hrefs are resolved against the candidate base
//! so the output stays fetchable; classification runs on the resolved form.
//!
//! This tier is explicitly best-effort: it sees only server-rendered anchors
//! on the base page, one unreachable candidate never aborts the rest, and
//! results from all candidates are unioned.

use crate::classify::PostClassifier;
use crate::http::{FetchOutcome, HttpContext};
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument};
use url::Url;

/// How many candidate pages are fetched in flight at once.
const SCRAPE_CONCURRENCY: usize = 4;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extract classifier-approved links from one page.
///
/// Hrefs that cannot be resolved against the base are classified in the raw
/// form they were found in.
pub fn extract_post_links<C: PostClassifier>(
    html: &str,
    base: &Url,
    classifier: &C,
) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    for element in document.select(&ANCHOR_SELECTOR) {
        if let Some(href) = element.value().attr("href") {
            let resolved = match base.join(href) {
                Ok(url) => url.to_string(),
                Err(_) => href.to_string(),
            };
            if classifier.is_post(&resolved) {
                links.push(resolved);
            }
        }
    }
    links
}

/// Scrape every candidate base page for post links and union the results.
///
/// Candidates are fetched with bounded concurrency; a failed fetch skips
/// that candidate and the rest continue.
#[instrument(level = "info", skip_all, fields(candidates = bases.len()))]
pub async fn scrape_candidates<C>(
    ctx: &HttpContext,
    classifier: &C,
    bases: &[Url],
) -> HashSet<String>
where
    C: PostClassifier + Sync,
{
    let collected: Vec<Vec<String>> = stream::iter(bases.iter().cloned())
        .map(|base| async move {
            match ctx.fetch_text(base.as_str()).await {
                FetchOutcome::Body(body) => {
                    let links = extract_post_links(&body, &base, classifier);
                    debug!(%base, count = links.len(), "Scraped candidate page");
                    links
                }
                FetchOutcome::Missing(status) => {
                    debug!(%base, %status, "Candidate page not available; skipping");
                    Vec::new()
                }
                FetchOutcome::Unreachable(reason) => {
                    debug!(%base, %reason, "Candidate page unreachable; skipping");
                    Vec::new()
                }
            }
        })
        .buffer_unordered(SCRAPE_CONCURRENCY)
        .collect()
        .await;

    let posts: HashSet<String> = collected.into_iter().flatten().collect();
    info!(count = posts.len(), "Fallback scrape complete");
    posts
}
