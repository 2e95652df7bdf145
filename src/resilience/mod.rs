//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce the per-call deadline)
//!     → on expiry: TimedOut outcome, 504 to the caller
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - No retries and no circuit breaking: one attempt per inbound request

pub mod timeouts;
