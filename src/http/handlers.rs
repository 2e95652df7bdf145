//! Route handlers.
//!
//! Each proxy route picks a query type (and maybe a key) and hands off to
//! [`proxy`]; everything else about the call is shared.

use std::time::Instant;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::config::{QUERY_HU, QUERY_MD5};
use crate::health::{self, ProbeResult, ServiceStatus};
use crate::http::error::HandlerError;
use crate::http::response::{format_timestamp, normalize};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::ForwardRequest;

/// Raw query pairs, in arrival order.
///
/// A repeated parameter is not an error: the first occurrence wins.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First non-empty value of `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    fn require_key(&self) -> Result<String, HandlerError> {
        self.first("key")
            .map(str::to_string)
            .ok_or(HandlerError::MissingKey)
    }
}

/// Forward, normalize, respond.
async fn proxy(state: &AppState, route: &'static str, request: ForwardRequest) -> Response {
    let start = Instant::now();
    let outcome = state.forwarder.forward(&request).await;
    let normalized = normalize(outcome);
    metrics::record_request(route, normalized.status.as_u16(), start);
    normalized.into_response()
}

fn reject(route: &'static str, err: HandlerError) -> Response {
    tracing::warn!(route, error = %err, "Rejected request");
    metrics::record_request(route, err.status().as_u16(), Instant::now());
    err.into_response()
}

pub async fn hu(State(state): State<AppState>) -> Response {
    proxy(&state, "hu", ForwardRequest::new(QUERY_HU, None)).await
}

pub async fn hu_with_key(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::new(pairs);
    match params.require_key() {
        Ok(key) => proxy(&state, "hu_with_key", ForwardRequest::new(QUERY_HU, Some(key))).await,
        Err(e) => reject("hu_with_key", e),
    }
}

pub async fn md5(State(state): State<AppState>) -> Response {
    proxy(&state, "md5", ForwardRequest::new(QUERY_MD5, None)).await
}

pub async fn md5_with_key(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::new(pairs);
    match params.require_key() {
        Ok(key) => proxy(&state, "md5_with_key", ForwardRequest::new(QUERY_MD5, Some(key))).await,
        Err(e) => reject("md5_with_key", e),
    }
}

pub async fn flexible(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::new(pairs);
    let query_type = params.first("type").unwrap_or(QUERY_HU);
    let key = params.first("key").map(str::to_string);
    proxy(&state, "all", ForwardRequest::new(query_type, key)).await
}

pub async fn service_status() -> Json<ServiceStatus> {
    Json(ServiceStatus::current())
}

#[derive(Debug, Serialize)]
pub struct TestAllReport {
    pub success: bool,
    pub results: Vec<ProbeResult>,
    pub timestamp: String,
}

pub async fn test_all(State(state): State<AppState>) -> Json<TestAllReport> {
    let results = health::probe_all(&state.forwarder).await;
    Json(TestAllReport {
        success: true,
        results,
        timestamp: format_timestamp(Utc::now()),
    })
}

/// `/` answers with an empty body.
pub async fn root() {}
