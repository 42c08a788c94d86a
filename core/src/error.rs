//! Error types for the catalog API client.
//!
//! # Design
//! `Rejected` gets a dedicated variant because this API reports most
//! failures through the response payload (`success: false` or an error
//! `message`), and callers surface that message verbatim. Responses that
//! carry no parseable payload land in `HttpError` with the raw status code
//! and body for debugging.

use std::fmt;

use crate::http::TransportError;

/// Errors returned by `CatalogClient` parse methods and `ProductStore`.
#[derive(Debug)]
pub enum ApiError {
    /// The injected transport failed before a response was produced.
    Transport(String),

    /// The server reported failure through the response payload.
    Rejected { message: String },

    /// The server returned a non-2xx status with no parseable error payload.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ApiError::Rejected { message } => {
                write!(f, "server rejected request: {message}")
            }
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err.message)
    }
}
