//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → request.rs (ForwardRequest: query type + optional key → target URL)
//!     → headers.rs (browser header set)
//!     → client.rs (GET with deadline)
//!     → outcome.rs (UpstreamOutcome: response or transport failure)
//!     → http::response (normalized envelope)
//! ```

pub mod client;
pub mod headers;
pub mod outcome;
pub mod request;

pub use client::{Forwarder, ForwarderError};
pub use outcome::{FailureKind, UpstreamOutcome};
pub use request::ForwardRequest;
