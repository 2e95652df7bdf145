//! Response normalization.
//!
//! # Responsibilities
//! - Turn every upstream outcome into the uniform JSON envelope
//! - Map upstream statuses and transport failures to HTTP status codes
//!
//! # Design Decisions
//! - `normalize` is pure and total: one envelope per outcome, never panics
//! - The envelope's `statusCode` always equals the HTTP status sent
//! - Bodies are decoded as JSON when possible, otherwise passed through as text
//!
//! | Outcome                       | Status            |
//! |-------------------------------|-------------------|
//! | refused                       | 502               |
//! | timed out                     | 504               |
//! | other transport failure       | 500 (or carried)  |
//! | upstream 403                  | 403               |
//! | upstream 200                  | 200               |
//! | any other upstream status     | passthrough       |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::upstream::{FailureKind, UpstreamOutcome};

/// Uniform JSON body returned to every proxy caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub status_code: u16,

    /// ISO-8601, millisecond precision, UTC.
    pub timestamp: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl Envelope {
    fn new(success: bool, status: StatusCode, at: DateTime<Utc>) -> Self {
        Self {
            success,
            data: None,
            error: None,
            message: None,
            status_code: status.as_u16(),
            timestamp: format_timestamp(at),
            details: None,
            solution: None,
        }
    }

    /// A failed envelope with an error string.
    pub fn failure(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(false, status, Utc::now())
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Envelope plus the status it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl IntoResponse for Normalized {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// `2024-01-02T03:04:05.678Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decode a body as JSON, falling back to the unchanged text.
pub fn parse_body(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Normalize an outcome, stamped with the current time.
pub fn normalize(outcome: UpstreamOutcome) -> Normalized {
    normalize_at(outcome, Utc::now())
}

/// Normalize an outcome with an explicit timestamp.
pub fn normalize_at(outcome: UpstreamOutcome, at: DateTime<Utc>) -> Normalized {
    match outcome {
        UpstreamOutcome::TransportFailure {
            kind,
            message,
            upstream_status,
        } => {
            let carried = upstream_status.and_then(|s| StatusCode::from_u16(s).ok());
            let (status, error) = match (carried, kind) {
                (Some(status), _) => (
                    status,
                    format!("upstream returned error status {}", status.as_u16()),
                ),
                (None, FailureKind::ConnectionRefused) => (
                    StatusCode::BAD_GATEWAY,
                    "unable to connect to upstream server".to_string(),
                ),
                (None, FailureKind::TimedOut) => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "upstream request timed out".to_string(),
                ),
                (None, FailureKind::Other) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "unable to fetch data from upstream".to_string(),
                ),
            };

            let envelope = Envelope {
                error: Some(error),
                details: Some(message),
                ..Envelope::new(false, status, at)
            };
            Normalized { status, envelope }
        }

        UpstreamOutcome::Success { status_code: 403, .. } => {
            let status = StatusCode::FORBIDDEN;
            let envelope = Envelope {
                error: Some("upstream returned 403 Forbidden".to_string()),
                message: Some(
                    "upstream requires authentication (a key) or has blocked the request"
                        .to_string(),
                ),
                solution: Some(
                    "obtain a valid key from cutoolsfree.fun and pass it via ?key=YOUR_KEY"
                        .to_string(),
                ),
                ..Envelope::new(false, status, at)
            };
            Normalized { status, envelope }
        }

        UpstreamOutcome::Success {
            status_code: 200,
            raw_body,
        } => {
            let status = StatusCode::OK;
            let envelope = Envelope {
                data: Some(parse_body(&raw_body)),
                ..Envelope::new(true, status, at)
            };
            Normalized { status, envelope }
        }

        UpstreamOutcome::Success {
            status_code,
            raw_body,
        } => {
            let status =
                StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let envelope = Envelope {
                error: Some(format!("upstream returned status {status_code}")),
                data: Some(Value::String(raw_body)),
                ..Envelope::new(false, status, at)
            };
            Normalized { status, envelope }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    fn success(status_code: u16, body: &str) -> UpstreamOutcome {
        UpstreamOutcome::Success {
            status_code,
            raw_body: body.to_string(),
        }
    }

    fn failure(kind: FailureKind, upstream_status: Option<u16>) -> UpstreamOutcome {
        UpstreamOutcome::TransportFailure {
            kind,
            message: "connect error: Connection refused (os error 111)".to_string(),
            upstream_status,
        }
    }

    #[test]
    fn test_json_body_is_decoded() {
        let out = normalize_at(success(200, r#"{"phien":123,"ket_qua":"Tai"}"#), at());
        assert_eq!(out.status, StatusCode::OK);
        assert!(out.envelope.success);
        assert_eq!(out.envelope.data, Some(json!({"phien": 123, "ket_qua": "Tai"})));
        assert_eq!(out.envelope.timestamp, "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn test_invalid_json_body_passes_through() {
        let raw = "<html>not json {</html>";
        let out = normalize_at(success(200, raw), at());
        assert!(out.envelope.success);
        assert_eq!(out.envelope.data, Some(Value::String(raw.to_string())));
    }

    #[test]
    fn test_json_scalar_body_is_decoded() {
        let out = normalize_at(success(200, "42"), at());
        assert_eq!(out.envelope.data, Some(json!(42)));
    }

    #[test]
    fn test_forbidden() {
        let out = normalize_at(success(403, "denied"), at());
        assert_eq!(out.status, StatusCode::FORBIDDEN);
        assert!(!out.envelope.success);
        assert_eq!(out.envelope.status_code, 403);
        assert!(out.envelope.solution.is_some());
        assert!(out.envelope.message.is_some());
        assert!(out.envelope.data.is_none());
    }

    #[test]
    fn test_other_status_passthrough() {
        let out = normalize_at(success(404, "{\"a\":1}"), at());
        assert_eq!(out.status, StatusCode::NOT_FOUND);
        assert_eq!(out.envelope.error.as_deref(), Some("upstream returned status 404"));
        assert_eq!(out.envelope.data, Some(Value::String("{\"a\":1}".into())));
        assert!(!out.envelope.success);
    }

    #[test]
    fn test_non_200_success_range_is_not_success() {
        let out = normalize_at(success(201, "created"), at());
        assert_eq!(out.status, StatusCode::CREATED);
        assert!(!out.envelope.success);
    }

    #[test]
    fn test_transport_failure_mapping() {
        let cases = [
            (FailureKind::ConnectionRefused, StatusCode::BAD_GATEWAY),
            (FailureKind::TimedOut, StatusCode::GATEWAY_TIMEOUT),
            (FailureKind::Other, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, expected) in cases {
            let out = normalize_at(failure(kind, None), at());
            assert_eq!(out.status, expected, "{kind:?}");
            assert_eq!(out.envelope.status_code, expected.as_u16());
            assert!(!out.envelope.success);
            assert_eq!(
                out.envelope.details.as_deref(),
                Some("connect error: Connection refused (os error 111)")
            );
        }
    }

    #[test]
    fn test_carried_status_wins_over_kind() {
        let out = normalize_at(failure(FailureKind::ConnectionRefused, Some(503)), at());
        assert_eq!(out.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(out.envelope.status_code, 503);
        assert_eq!(
            out.envelope.error.as_deref(),
            Some("upstream returned error status 503")
        );
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let out = normalize_at(success(200, "[]"), at());
        let value = serde_json::to_value(&out.envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "data": [],
                "statusCode": 200,
                "timestamp": "2024-05-01T12:30:00.000Z"
            })
        );
    }

    #[test]
    fn test_status_code_always_matches() {
        let outcomes = [
            success(200, "{}"),
            success(403, ""),
            success(500, "oops"),
            success(599, ""),
            failure(FailureKind::Other, None),
            failure(FailureKind::TimedOut, Some(502)),
        ];
        for outcome in outcomes {
            let expect_success = outcome.is_success();
            let out = normalize_at(outcome, at());
            assert_eq!(out.envelope.status_code, out.status.as_u16());
            assert_eq!(out.envelope.success, expect_success);
        }
    }
}
