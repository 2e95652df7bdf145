//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Turn a `ForwardRequest` into a GET against the single upstream origin
//! - Attach the browser header set and enforce the call deadline
//! - Report every status 200–599 as a response, everything else as a
//!   transport failure
//!
//! # Design Decisions
//! - One attempt per call, no retries
//! - Connection pooling left to reqwest defaults
//! - Configuration is handed in explicitly; nothing is read from the process

use std::time::{Duration, Instant};

use axum::http::header::{HeaderMap, InvalidHeaderValue};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::config::{ProxyConfig, UpstreamConfig};
use crate::observability::metrics;
use crate::resilience::timeouts::{bounded, Bounded};
use crate::upstream::headers::{browser_headers, probe_headers};
use crate::upstream::outcome::{FailureKind, UpstreamOutcome};
use crate::upstream::request::{build_query_url, ForwardRequest};

/// Errors constructing a [`Forwarder`].
#[derive(Debug, Error)]
pub enum ForwarderError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("invalid upstream header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

/// Forwards proxied calls and probes to the upstream origin.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    upstream: UpstreamConfig,
    browser_headers: HeaderMap,
    probe_headers: HeaderMap,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl Forwarder {
    pub fn new(config: &ProxyConfig) -> Result<Self, ForwarderError> {
        // System proxy variables are ignored: the upstream is reached directly.
        let client = Client::builder().no_proxy().build()?;

        Ok(Self {
            client,
            browser_headers: browser_headers(&config.upstream)?,
            probe_headers: probe_headers(&config.upstream)?,
            upstream: config.upstream.clone(),
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
            probe_timeout: Duration::from_secs(config.timeouts.probe_secs),
        })
    }

    pub fn upstream(&self) -> &UpstreamConfig {
        &self.upstream
    }

    /// Forward one proxied call with the browser header set.
    pub async fn forward(&self, request: &ForwardRequest) -> UpstreamOutcome {
        let url = match request.target_url(&self.upstream.origin) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, origin = %self.upstream.origin, "Invalid upstream URL");
                return UpstreamOutcome::failure(FailureKind::Other, e.to_string());
            }
        };

        tracing::debug!(
            query_type = %request.query_type(),
            with_key = request.has_credential(),
            "Calling upstream"
        );

        let outcome = self
            .fetch(url, &self.browser_headers, self.request_timeout)
            .await;
        log_outcome(request.query_type(), &outcome);
        outcome
    }

    /// Probe one sub-API with the bare header set and the short deadline.
    ///
    /// Returns the probed URL alongside the outcome.
    pub async fn probe(&self, query_type: &str) -> (String, UpstreamOutcome) {
        let url = match build_query_url(&self.upstream.origin, query_type, None) {
            Ok(url) => url,
            Err(e) => {
                let outcome = UpstreamOutcome::failure(FailureKind::Other, e.to_string());
                return (self.upstream.origin.clone(), outcome);
            }
        };

        let url_text = url.to_string();
        let outcome = self.fetch(url, &self.probe_headers, self.probe_timeout).await;
        log_outcome(query_type, &outcome);
        (url_text, outcome)
    }

    async fn fetch(&self, url: Url, headers: &HeaderMap, limit: Duration) -> UpstreamOutcome {
        let start = Instant::now();
        let call = async {
            let response = self
                .client
                .get(url)
                .headers(headers.clone())
                .timeout(limit)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let outcome = match bounded(limit, call).await {
            Ok((status, body)) => UpstreamOutcome::from_response(status, body),
            Err(elapsed @ Bounded::Elapsed(_)) => {
                UpstreamOutcome::failure(FailureKind::TimedOut, elapsed.to_string())
            }
            Err(Bounded::Inner(e)) => UpstreamOutcome::from_error(e),
        };

        metrics::record_upstream(&outcome, start);
        outcome
    }
}

fn log_outcome(query_type: &str, outcome: &UpstreamOutcome) {
    match outcome {
        UpstreamOutcome::Success { status_code, raw_body } => {
            tracing::info!(
                query_type = %query_type,
                status = status_code,
                body_len = raw_body.len(),
                "Upstream responded"
            );
        }
        UpstreamOutcome::TransportFailure { kind, message, .. } => {
            tracing::warn!(
                query_type = %query_type,
                kind = kind.as_str(),
                error = %message,
                "Upstream call failed"
            );
        }
    }
}
