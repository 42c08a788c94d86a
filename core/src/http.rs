//! HTTP transport types and the injectable transport seam.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and parses `HttpResponse` values without ever touching the
//! network; the actual round-trip happens behind the `Transport` trait,
//! which the composition root supplies (a real HTTP client in production,
//! a scripted double in tests). This keeps the client core deterministic
//! and lets store tests assert on the exact requests issued.
//!
//! All fields use owned types (`String`, `Vec`) so values can be recorded
//! and replayed by test doubles without lifetime concerns.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `CatalogClient::build_*` methods and executed by a `Transport`
/// implementation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` implementation, then passed to
/// `CatalogClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Failure of the transport layer itself (connection refused, DNS, broken
/// pipe). Server-reported errors are not transport errors; they arrive as
/// ordinary `HttpResponse` values.
#[derive(Debug, Clone)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {}

/// Executes an `HttpRequest` and returns the server's `HttpResponse`.
///
/// Implementations must return non-2xx responses as `Ok` values; `Err` is
/// reserved for failures where no response was produced at all.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
