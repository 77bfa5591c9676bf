//! The discovery protocol: variants, probing, robots.txt, walk, fallback.
//!
//! Discovery runs as a tiered state machine over the resolved candidate
//! bases:
//!
//! 1. **Sitemap search** - for each candidate in resolver order, probe the
//!    well-known sitemap paths, then that candidate's robots.txt directive.
//!    The first hit anywhere ends the search.
//! 2. **Walk** - a located sitemap is walked recursively and its (classified,
//!    deduplicated) URLs are the final output. Fallback scraping does not
//!    additionally run.
//! 3. **Fallback** - with no sitemap located anywhere, every candidate base
//!    page is scraped for anchors.
//!
//! Candidates and paths are iterated sequentially, so the tie-break between
//! variants is deterministic: the first candidate in resolver order wins.
//!
//! An empty result set is a valid terminal state, not an error; there are no
//! fatal failures in this pipeline.

use crate::classify::{ExclusionList, PostClassifier};
use crate::http::HttpContext;
use crate::{robots, scrape, sitemap, variants};
use std::collections::HashSet;
use tracing::{info, instrument, warn};
use url::Url;

/// Sitemap locations worth probing before consulting robots.txt, in order.
const WELL_KNOWN_SITEMAP_PATHS: [&str; 4] = [
    "sitemap.xml",
    "sitemap_index.xml",
    "sitemap-index.xml",
    "sitemap1.xml",
];

/// Locate a sitemap URL for any of the candidate bases.
///
/// Probes the well-known paths for each candidate first; if none answers,
/// falls back to that candidate's robots.txt `Sitemap:` directive before
/// moving to the next candidate. Returns the first location found.
#[instrument(level = "info", skip_all, fields(candidates = bases.len()))]
pub async fn find_sitemap_url(ctx: &HttpContext, bases: &[Url]) -> Option<String> {
    for base in bases {
        for sitemap_path in WELL_KNOWN_SITEMAP_PATHS {
            let Ok(sitemap_url) = base.join(sitemap_path) else {
                continue;
            };
            if ctx.exists(&sitemap_url).await {
                info!(%sitemap_url, "Sitemap found at well-known path");
                return Some(sitemap_url.into());
            }
        }

        if let Ok(robots_url) = base.join("robots.txt") {
            if let Some(sitemap_url) = robots::sitemap_from_robots(ctx, &robots_url).await {
                return Some(sitemap_url);
            }
        }
    }

    info!("No sitemap located for any candidate");
    None
}

/// Discover a site's blog post URLs from raw user input.
///
/// Uses the default [`ExclusionList`] classifier. The result is a
/// deduplicated set; order is not significant. An empty set means every
/// discovery tier came up empty (or the input had no usable host).
pub async fn discover(ctx: &HttpContext, raw_input: &str) -> HashSet<String> {
    discover_with(ctx, &ExclusionList::default(), raw_input).await
}

/// Discover with a caller-supplied classifier.
#[instrument(level = "info", skip(ctx, classifier))]
pub async fn discover_with<C>(ctx: &HttpContext, classifier: &C, raw_input: &str) -> HashSet<String>
where
    C: PostClassifier + Sync,
{
    let bases = variants::resolve(raw_input);
    if bases.is_empty() {
        warn!(input = raw_input, "No candidate bases resolved; nothing to discover");
        return HashSet::new();
    }

    match find_sitemap_url(ctx, &bases).await {
        Some(sitemap_url) => sitemap::walk(ctx, classifier, &sitemap_url).await,
        None => {
            info!("Falling back to HTML scraping across candidates");
            scrape::scrape_candidates(ctx, classifier, &bases).await
        }
    }
}

/// Walk a known sitemap directly, skipping location search.
///
/// Mirrors [`discover`] for callers that have already located (or been
/// handed) a sitemap URL.
pub async fn discover_from_sitemap(ctx: &HttpContext, sitemap_url: &str) -> HashSet<String> {
    sitemap::walk(ctx, &ExclusionList::default(), sitemap_url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ctx() -> HttpContext {
        HttpContext::new(Duration::from_secs(2)).unwrap()
    }

    /// Mount HEAD 404s for every well-known sitemap path.
    async fn mount_no_sitemaps(server: &MockServer) {
        for p in WELL_KNOWN_SITEMAP_PATHS {
            Mock::given(method("HEAD"))
                .and(path(format!("/{p}")))
                .respond_with(ResponseTemplate::new(404))
                .mount(server)
                .await;
        }
    }

    #[tokio::test]
    async fn test_end_to_end_sitemap_discovery() {
        let server = MockServer::start().await;
        let base = server.uri();

        Mock::given(method("HEAD"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<urlset>\
                 <url><loc>https://example.com/blog/my-post</loc></url>\
                 <url><loc>https://example.com/tag/news</loc></url>\
                 </urlset>",
            ))
            .mount(&server)
            .await;

        let posts = discover(&ctx(), &base).await;
        let expected: HashSet<String> = ["https://example.com/blog/my-post".to_string()].into();
        assert_eq!(posts, expected);
    }

    #[tokio::test]
    async fn test_walk_output_is_final_even_when_empty() {
        let server = MockServer::start().await;
        let base = server.uri();

        // A sitemap exists but yields nothing after classification. The base
        // page has a scrapable post anchor, which must NOT be picked up:
        // once a sitemap is located, its walk output is the final answer and
        // the fallback scrape does not additionally run.
        Mock::given(method("HEAD"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<urlset><url><loc>https://example.com/tag/only-noise</loc></url></urlset>",
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<a href="/blog/should-not-appear">post</a>"#),
            )
            .mount(&server)
            .await;

        let posts = discover(&ctx(), &base).await;
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_probe_order_prefers_earlier_well_known_path() {
        let server = MockServer::start().await;
        let base = server.uri();

        // Both exist; the walker must be fed sitemap.xml, not sitemap1.xml.
        for p in ["sitemap.xml", "sitemap1.xml"] {
            Mock::given(method("HEAD"))
                .and(path(format!("/{p}")))
                .respond_with(ResponseTemplate::new(200))
                .mount(&server)
                .await;
        }

        let bases = variants::resolve(&base);
        let found = find_sitemap_url(&ctx(), &bases).await;
        assert_eq!(found, Some(format!("{base}/sitemap.xml")));
    }

    #[tokio::test]
    async fn test_robots_tier_after_probe_misses() {
        let server = MockServer::start().await;
        let base = server.uri();

        mount_no_sitemaps(&server).await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("User-agent: *\nSitemap: {base}/hidden.xml\n")),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/hidden.xml"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(
                    "<urlset><url><loc>https://example.com/blog/hidden-post</loc></url></urlset>",
                ),
            )
            .mount(&server)
            .await;

        let posts = discover(&ctx(), &base).await;
        let expected: HashSet<String> = ["https://example.com/blog/hidden-post".to_string()].into();
        assert_eq!(posts, expected);
    }

    #[tokio::test]
    async fn test_fallback_scrape_when_no_sitemap_anywhere() {
        let server = MockServer::start().await;
        let base = server.uri();

        mount_no_sitemaps(&server).await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<a href="/blog/scraped-post">post</a> <a href="/category/noise">cat</a>"#,
            ))
            .mount(&server)
            .await;

        let posts = discover(&ctx(), &base).await;
        let expected: HashSet<String> = [format!("{base}/blog/scraped-post")].into();
        assert_eq!(posts, expected);
    }

    #[tokio::test]
    async fn test_total_failure_is_empty_not_error() {
        // Unreachable host: every tier degrades and the result is empty.
        let posts = discover(&ctx(), "does-not-exist.invalid").await;
        assert!(posts.is_empty());

        // Unusable input resolves to no candidates at all.
        let posts = discover(&ctx(), "ht tp:// not a host").await;
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_discover_from_sitemap_skips_search() {
        let server = MockServer::start().await;
        let base = server.uri();

        // No HEAD mocks at all: if location search ran, it would find nothing.
        Mock::given(method("GET"))
            .and(path("/direct.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<urlset><url><loc>https://example.com/blog/direct</loc></url></urlset>",
            ))
            .mount(&server)
            .await;

        let posts = discover_from_sitemap(&ctx(), &format!("{base}/direct.xml")).await;
        let expected: HashSet<String> = ["https://example.com/blog/direct".to_string()].into();
        assert_eq!(posts, expected);
    }
}
