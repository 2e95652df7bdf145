//! Bulk upstream probe behind `/api/test-all`.
//!
//! # Responsibilities
//! - Call each configured sub-API once, in order
//! - Record status and body size, or the transport error, per sub-API
//!
//! # Design Decisions
//! - Probes run sequentially, each with its own deadline
//! - One probe failing never stops the others

use serde::Serialize;

use crate::upstream::{Forwarder, UpstreamOutcome};

/// Probe status: the HTTP status, or `"ERROR"` on transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProbeStatus {
    Code(u16),
    Error(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub name: String,
    pub url: String,
    pub status: ProbeStatus,
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn from_outcome(name: &str, url: String, outcome: UpstreamOutcome) -> Self {
        match outcome {
            UpstreamOutcome::Success {
                status_code,
                raw_body,
            } => Self {
                name: name.to_string(),
                url,
                status: ProbeStatus::Code(status_code),
                success: status_code == 200,
                data_length: Some(raw_body.len()),
                error: None,
            },
            UpstreamOutcome::TransportFailure { message, .. } => Self {
                name: name.to_string(),
                url,
                status: ProbeStatus::Error("ERROR"),
                success: false,
                data_length: None,
                error: Some(message),
            },
        }
    }
}

/// Probe every configured sub-API in order.
pub async fn probe_all(forwarder: &Forwarder) -> Vec<ProbeResult> {
    let queries = &forwarder.upstream().probe_queries;
    let mut results = Vec::with_capacity(queries.len());

    for name in queries {
        let (url, outcome) = forwarder.probe(name).await;
        results.push(ProbeResult::from_outcome(name, url, outcome));
    }

    let healthy = results.iter().filter(|r| r.success).count();
    tracing::info!(probed = results.len(), healthy, "Upstream probe finished");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::FailureKind;
    use serde_json::json;

    #[test]
    fn test_reachable_result_shape() {
        let outcome = UpstreamOutcome::Success {
            status_code: 200,
            raw_body: "hello".into(),
        };
        let result = ProbeResult::from_outcome("lc79_hu", "http://x/?api=lc79_hu".into(), outcome);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "name": "lc79_hu",
                "url": "http://x/?api=lc79_hu",
                "status": 200,
                "success": true,
                "dataLength": 5
            })
        );
    }

    #[test]
    fn test_non_200_is_reported_but_unsuccessful() {
        let outcome = UpstreamOutcome::Success {
            status_code: 403,
            raw_body: String::new(),
        };
        let result = ProbeResult::from_outcome("lc79_md5", "u".into(), outcome);
        assert_eq!(result.status, ProbeStatus::Code(403));
        assert!(!result.success);
        assert_eq!(result.data_length, Some(0));
    }

    #[test]
    fn test_failure_result_shape() {
        let outcome = UpstreamOutcome::failure(FailureKind::TimedOut, "timeout of 8000ms exceeded");
        let result = ProbeResult::from_outcome("lc79_md5", "u".into(), outcome);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "name": "lc79_md5",
                "url": "u",
                "status": "ERROR",
                "success": false,
                "error": "timeout of 8000ms exceeded"
            })
        );
    }
}
