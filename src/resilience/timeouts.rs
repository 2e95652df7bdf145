//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream calls with a hard deadline
//! - Keep elapsed deadlines distinct from the call's own errors
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; the inner future is dropped on expiry
//! - Timed-out requests surface as 504 Gateway Timeout

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time;

/// Failure of a deadline-bounded call.
#[derive(Debug, Error)]
pub enum Bounded<E> {
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Elapsed(Duration),

    #[error(transparent)]
    Inner(E),
}

/// Run `fut` for at most `limit`.
pub async fn bounded<F, T, E>(limit: Duration, fut: F) -> Result<T, Bounded<E>>
where
    F: Future<Output = Result<T, E>>,
{
    match time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(Bounded::Inner(e)),
        Err(_) => Err(Bounded::Elapsed(limit)),
    }
}
