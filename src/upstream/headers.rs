//! Header sets sent upstream.
//!
//! The upstream answers only clients that look like a desktop browser, so
//! proxied calls carry a fixed browser header set instead of the caller's
//! headers. The bulk probe sends a bare User-Agent.

use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION,
    HOST, REFERER, USER_AGENT,
};

use crate::config::UpstreamConfig;

/// Build the browser-impersonating header set for proxied calls.
pub fn browser_headers(config: &UpstreamConfig) -> Result<HeaderMap, InvalidHeaderValue> {
    let pairs: [(HeaderName, &str); 6] = [
        (REFERER, config.referer.as_str()),
        (USER_AGENT, config.user_agent.as_str()),
        (ACCEPT, config.accept.as_str()),
        (ACCEPT_LANGUAGE, config.accept_language.as_str()),
        (CONNECTION, config.connection.as_str()),
        (HOST, config.host.as_str()),
    ];

    let mut headers = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        // Empty values are left for the client to fill in.
        if value.is_empty() {
            continue;
        }
        headers.insert(name, HeaderValue::from_str(value)?);
    }
    Ok(headers)
}

/// Headers for the bulk probe.
pub fn probe_headers(config: &UpstreamConfig) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::with_capacity(1);
    headers.insert(USER_AGENT, HeaderValue::from_str(&config.probe_user_agent)?);
    Ok(headers)
}
