//! Errors raised by route handlers before any upstream call.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::http::response::Envelope;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("missing key")]
    MissingKey,
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::MissingKey => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = match self {
            HandlerError::MissingKey => Envelope::failure(status, self.to_string())
                .with_message("provide a key via the query parameter: ?key=YOUR_KEY"),
        };
        (status, Json(envelope)).into_response()
    }
}
