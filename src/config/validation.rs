//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Check that the upstream origin and header values are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("upstream.origin '{0}' is not an absolute http(s) URL")]
    Origin(String),

    #[error("upstream.{field} is not a valid header value")]
    HeaderValue { field: &'static str },

    #[error("upstream.probe_queries must not be empty")]
    NoProbeQueries,

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("PORT '{0}' is not a valid port number")]
    Port(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let upstream = &config.upstream;
    match Url::parse(&upstream.origin) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::Origin(upstream.origin.clone())),
    }

    let headers = [
        ("referer", &upstream.referer),
        ("host", &upstream.host),
        ("user_agent", &upstream.user_agent),
        ("accept", &upstream.accept),
        ("accept_language", &upstream.accept_language),
        ("connection", &upstream.connection),
        ("probe_user_agent", &upstream.probe_user_agent),
    ];
    for (field, value) in headers {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::HeaderValue { field });
        }
    }

    if upstream.probe_queries.is_empty() {
        errors.push(ValidationError::NoProbeQueries);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.probe_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("probe_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
