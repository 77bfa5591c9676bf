//! Candidate base URL resolution from raw user input.
//!
//! Users type anything from `example.com` to `https://www.example.com/blog`.
//! Discovery needs concrete base URLs to probe, and sites are inconsistent
//! about `www` and about which scheme actually answers, so one input fans
//! out into an ordered list of candidates: host variants (original, with
//! `www.` toggled) crossed with both schemes, preserving whatever path,
//! query, and fragment the input carried.
//!
//! Ordering encodes preference. The original host comes before synthesized
//! variants, and within a host `http` is probed before `https`, so the first
//! candidate that answers is the closest to what the user typed.

use itertools::Itertools;
use tracing::{debug, warn};
use url::Url;

/// Resolve raw user input into an ordered list of candidate base URLs.
///
/// Parses the input as a URL, retrying with an `https://` prefix when no
/// host is recognized (covers bare domains and `host:port` inputs). Never
/// fails: input that cannot be coerced into anything with a host yields an
/// empty list, which the orchestrator treats as "nothing to discover".
///
/// The output contains no two entries with the same (scheme, host, port).
pub fn resolve(raw: &str) -> Vec<Url> {
    let trimmed = raw.trim();

    let parsed = match Url::parse(trimmed) {
        Ok(url) if url.host_str().is_some() => url,
        _ => match Url::parse(&format!("https://{trimmed}")) {
            Ok(url) if url.host_str().is_some() => url,
            _ => {
                warn!(input = trimmed, "Input could not be coerced into a URL with a host");
                return Vec::new();
            }
        },
    };

    let Some(host) = parsed.host_str().map(str::to_string) else {
        return Vec::new();
    };

    // Original host first, then the www-toggled variant.
    let mut hosts = vec![host.clone()];
    match host.strip_prefix("www.") {
        Some(stripped) => hosts.push(stripped.to_string()),
        None => hosts.push(format!("www.{host}")),
    }

    let mut candidates = Vec::new();
    for variant in &hosts {
        for scheme in ["http", "https"] {
            let mut candidate = parsed.clone();
            if candidate.set_scheme(scheme).is_err() {
                continue;
            }
            // IP-literal hosts reject a www. prefix; skip that variant.
            if candidate.set_host(Some(variant)).is_err() {
                debug!(host = %variant, "Host variant rejected by URL parser; skipping");
                continue;
            }
            candidates.push(candidate);
        }
    }

    let candidates: Vec<Url> = candidates
        .into_iter()
        .unique_by(|u| {
            (
                u.scheme().to_string(),
                u.host_str().map(str::to_string),
                u.port(),
            )
        })
        .collect();

    debug!(input = trimmed, count = candidates.len(), "Resolved candidate bases");
    candidates
}
