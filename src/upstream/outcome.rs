//! Result of a single upstream call.

use std::error::Error as StdError;
use std::io;

/// Why an upstream call produced no usable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    ConnectionRefused,
    TimedOut,
    Other,
}

impl FailureKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ConnectionRefused => "connection_refused",
            FailureKind::TimedOut => "timed_out",
            FailureKind::Other => "other",
        }
    }
}

/// Either an HTTP response (any status 200–599) or a transport failure.
///
/// The two variants are exclusive: an upstream error status is always a
/// `Success`, never a `TransportFailure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    Success {
        status_code: u16,
        raw_body: String,
    },
    TransportFailure {
        kind: FailureKind,
        message: String,
        /// Status reported alongside the failure, if the transport had one.
        upstream_status: Option<u16>,
    },
}

impl UpstreamOutcome {
    /// Statuses outside 200–599 are not accepted as responses.
    pub fn from_response(status_code: u16, raw_body: String) -> Self {
        if (200..600).contains(&status_code) {
            UpstreamOutcome::Success {
                status_code,
                raw_body,
            }
        } else {
            UpstreamOutcome::failure(
                FailureKind::Other,
                format!("upstream returned unsupported status {status_code}"),
            )
        }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        UpstreamOutcome::TransportFailure {
            kind,
            message: message.into(),
            upstream_status: None,
        }
    }

    /// Classify a client error. The request URL is stripped from the message
    /// so credentials never leak into responses or logs.
    pub fn from_error(err: reqwest::Error) -> Self {
        let kind = classify(&err);
        let upstream_status = err.status().map(|s| s.as_u16());
        UpstreamOutcome::TransportFailure {
            kind,
            message: error_chain(&err.without_url()),
            upstream_status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UpstreamOutcome::Success { status_code: 200, .. })
    }
}

/// Map a client error onto a failure kind.
pub fn classify(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() || has_io_kind(err, io::ErrorKind::TimedOut) {
        FailureKind::TimedOut
    } else if has_io_kind(err, io::ErrorKind::ConnectionRefused)
        || (err.is_connect() && error_chain(err).to_ascii_lowercase().contains("refused"))
    {
        FailureKind::ConnectionRefused
    } else {
        FailureKind::Other
    }
}

fn has_io_kind(err: &(dyn StdError + 'static), kind: io::ErrorKind) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if io_err.kind() == kind {
                return true;
            }
        }
        current = e.source();
    }
    false
}

/// `outer: inner: root` rendering of an error and its sources.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(e) = current {
        let text = e.to_string();
        if parts.last() != Some(&text) {
            parts.push(text);
        }
        current = e.source();
    }
    parts.join(": ")
}
