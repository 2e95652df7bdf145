//! Single-upstream JSON proxy for the cutoolsfree.fun feeds.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ http::server ──▶ http::handlers ──▶ upstream::Forwarder ──▶ cutoolsfree.fun
//!                                       │                    │
//!     Client ◀── JSON envelope ◀── http::response ◀── UpstreamOutcome
//!
//!     Cross-cutting: config, observability, resilience (timeouts),
//!                    health (/health, /api/test-all), lifecycle
//! ```

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
