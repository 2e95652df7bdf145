//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health (status.rs):
//!     static status + endpoint index, no upstream traffic
//!
//! GET /api/test-all (probe.rs):
//!     for each configured sub-API, in order
//!     → Forwarder::probe (short deadline, bare headers)
//!     → ProbeResult (status + size, or error)
//! ```

pub mod probe;
pub mod status;

pub use probe::{probe_all, ProbeResult, ProbeStatus};
pub use status::ServiceStatus;
