//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (pick query type, read ?key)
//!     → upstream::Forwarder
//!     → response.rs (normalize into the JSON envelope)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use error::HandlerError;
pub use request::X_REQUEST_ID;
pub use response::{normalize, Envelope, Normalized};
pub use server::{AppState, HttpServer};
