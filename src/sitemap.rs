//! Sitemap fetching, parsing, and recursive walking.
//!
//! Sitemap documents come in two shapes: an *index* whose `<sitemap>` entries
//! point at nested sitemap documents, and a *leaf* whose `<url>` entries point
//! at pages. Both carry the target in a `<loc>` child. The walker flattens an
//! arbitrary index/leaf graph into one set of post URLs.
//!
//! Recursion is expressed as a work-list loop with a visited set, so a
//! malformed self-referential sitemap graph terminates instead of looping;
//! cycle safety is structural, not an afterthought. Malformed XML and failed
//! nested fetches contribute nothing and the walk continues. Only if the root
//! itself is unreachable does the walk come back empty, which is the uniform
//! "nothing found" signal the orchestrator needs to move to the next tier.

use crate::classify::PostClassifier;
use crate::http::{FetchOutcome, HttpContext};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, instrument, warn};

/// Entries extracted from a single sitemap document.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SitemapPage {
    /// `<sitemap><loc>` targets: nested sitemap documents to walk next.
    pub child_sitemaps: Vec<String>,
    /// `<url><loc>` targets: page URLs, unclassified.
    pub page_urls: Vec<String>,
}

/// Which entry kind the parser is currently inside.
enum Entry {
    None,
    Url,
    Sitemap,
}

/// Parse one sitemap document into its child-sitemap and page entries.
///
/// Lenient by design: a parse error terminates the document but keeps every
/// entry extracted up to that point, and `<loc>`-less entries are skipped.
pub fn parse_sitemap(xml: &str) -> SitemapPage {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut page = SitemapPage::default();
    let mut entry = Entry::None;
    let mut in_loc = false;
    let mut loc = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"url" => entry = Entry::Url,
                b"sitemap" => entry = Entry::Sitemap,
                b"loc" => {
                    in_loc = true;
                    loc.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_loc {
                    loc.push_str(&e.xml_content().unwrap_or_default());
                }
            }
            Ok(Event::CData(e)) => {
                if in_loc {
                    loc.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"loc" => {
                    in_loc = false;
                    let target = loc.trim();
                    if !target.is_empty() {
                        match entry {
                            Entry::Url => page.page_urls.push(target.to_string()),
                            Entry::Sitemap => page.child_sitemaps.push(target.to_string()),
                            Entry::None => {}
                        }
                    }
                }
                b"url" | b"sitemap" => entry = Entry::None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Malformed sitemap XML; keeping entries parsed so far");
                break;
            }
        }
    }

    page
}

/// Walk a sitemap graph starting at `root`, returning all post URLs.
///
/// Nested sitemaps referenced by `<sitemap>` entries are queued and fetched
/// in turn; each document is fetched at most once. Page URLs are filtered
/// through the classifier before entering the result set.
#[instrument(level = "info", skip(ctx, classifier))]
pub async fn walk<C: PostClassifier>(
    ctx: &HttpContext,
    classifier: &C,
    root: &str,
) -> HashSet<String> {
    let mut posts = HashSet::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(root.to_string());

    while let Some(sitemap_url) = queue.pop_front() {
        if !visited.insert(sitemap_url.clone()) {
            debug!(%sitemap_url, "Sitemap already visited; skipping cycle");
            continue;
        }

        let body = match ctx.fetch_text(&sitemap_url).await {
            FetchOutcome::Body(body) => body,
            FetchOutcome::Missing(status) => {
                warn!(%sitemap_url, %status, "Sitemap fetch returned non-success; skipping");
                continue;
            }
            FetchOutcome::Unreachable(reason) => {
                warn!(%sitemap_url, %reason, "Sitemap unreachable; skipping");
                continue;
            }
        };

        let page = parse_sitemap(&body);
        debug!(
            %sitemap_url,
            children = page.child_sitemaps.len(),
            pages = page.page_urls.len(),
            "Parsed sitemap document"
        );

        queue.extend(page.child_sitemaps);
        for url in page.page_urls {
            if classifier.is_post(&url) {
                posts.insert(url);
            }
        }
    }

    info!(
        count = posts.len(),
        sitemaps_visited = visited.len(),
        "Sitemap walk complete"
    );
    posts
}
