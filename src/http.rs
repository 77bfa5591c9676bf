//! Shared HTTP context for probing and fetching.
//!
//! Every network operation in the discovery pipeline goes through one
//! [`HttpContext`], which owns a pooled [`reqwest::Client`] with a hard
//! per-request timeout and a bounded redirect policy. The context is built
//! once per discovery run and passed down explicitly; nothing here is
//! global or ambient.
//!
//! Fetch results are reported as a three-way [`FetchOutcome`] so callers can
//! tell "the resource is not there" apart from "the network failed" when
//! logging, even though both degrade to an empty contribution.

use reqwest::{Client, StatusCode, redirect};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Default per-request timeout in seconds. Discovery fans out over many
/// candidate URLs, so a single slow host must not stall the whole run.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Outcome of a text fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The resource responded with a success status; body attached.
    Body(String),
    /// The host answered but the resource is absent (non-success status).
    Missing(StatusCode),
    /// The host could not be reached at all (timeout, DNS, refused, TLS).
    Unreachable(String),
}

/// Explicit HTTP context owning the client used for all discovery requests.
#[derive(Debug, Clone)]
pub struct HttpContext {
    client: Client,
}

impl HttpContext {
    /// Build a context with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("blogscout/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    /// Cheap existence probe: HEAD request, no body transfer.
    ///
    /// Returns `true` only for a success status after redirects. Any network
    /// failure, timeout, or non-success status is `false`; probes never raise.
    #[instrument(level = "debug", skip(self), fields(%url))]
    pub async fn exists(&self, url: &Url) -> bool {
        match self.client.head(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(%status, "Existence probe answered");
                status.is_success()
            }
            Err(e) => {
                debug!(error = %e, "Existence probe failed");
                false
            }
        }
    }

    /// Fetch a resource as text.
    #[instrument(level = "debug", skip(self), fields(%url))]
    pub async fn fetch_text(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "Fetch failed");
                return FetchOutcome::Unreachable(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "Fetch returned non-success status");
            return FetchOutcome::Missing(status);
        }

        match response.text().await {
            Ok(body) => {
                debug!(bytes = body.len(), "Fetched body");
                FetchOutcome::Body(body)
            }
            Err(e) => {
                debug!(error = %e, "Body read failed");
                FetchOutcome::Unreachable(e.to_string())
            }
        }
    }
}
