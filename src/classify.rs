//! Heuristic classification of page URLs into posts and non-posts.
//!
//! Sitemaps and scraped pages mix real articles with taxonomy and navigation
//! pages (tag listings, category archives, pagination, comment feeds). This
//! module separates them with a coarse substring heuristic: a URL containing
//! any excluded token is rejected, everything else is accepted.
//!
//! The heuristic is deliberately blunt. A post whose slug happens to contain
//! `page` is a false negative and a taxonomy URL that evades every token is a
//! false positive; both are accepted trade-offs. The [`PostClassifier`] trait
//! keeps the heuristic swappable (e.g., for path-segment matching) without
//! touching the sitemap walker or scraper.

/// URL tokens that mark navigation, taxonomy, and pagination pages.
///
/// `#` and `?` reject fragment and query URLs outright, which also filters
/// search results and in-page anchors.
pub const EXCLUDED_TOKENS: [&str; 10] = [
    "tag", "category", "author", "page", "comment", "archive", "login", "search", "#", "?",
];

/// Pure predicate separating post URLs from navigation/taxonomy noise.
///
/// Implementations must be deterministic and perform no I/O.
pub trait PostClassifier {
    /// Returns `true` if the URL looks like a real blog post.
    fn is_post(&self, url: &str) -> bool;
}

/// Default classifier: reject any URL containing an excluded token as a substring.
#[derive(Debug, Clone)]
pub struct ExclusionList {
    tokens: &'static [&'static str],
}

impl Default for ExclusionList {
    fn default() -> Self {
        Self {
            tokens: &EXCLUDED_TOKENS,
        }
    }
}

impl PostClassifier for ExclusionList {
    fn is_post(&self, url: &str) -> bool {
        !self.tokens.iter().any(|token| url.contains(token))
    }
}
