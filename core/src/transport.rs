//! The seam between the request builder and the HTTP client that does the
//! actual I/O.
//!
//! # Design
//! `RequestBuilder` never touches a socket. It hands a `TransportRequest` to
//! a `Transport` and interprets the `TransportOutcome` it gets back. The
//! outcome keeps a transport failure distinct from a well-formed error
//! response, and a failure may still carry the response the server sent.

use std::time::Duration;

use thiserror::Error;

use crate::headers::Headers;
use crate::http::{HttpMethod, HttpResponse};

/// Whether the transport may follow redirects, and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedirectPolicy {
    pub allow: bool,
    pub max: u32,
}

impl RedirectPolicy {
    /// Number of hops the transport should follow; zero when not allowed.
    pub fn max_hops(&self) -> u32 {
        if self.allow {
            self.max
        } else {
            0
        }
    }
}

/// A fully assembled request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
    /// `None` leaves the transport's own default in place.
    pub timeout: Option<Duration>,
    pub redirects: RedirectPolicy,
}

/// Failures raised by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("i/o error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

/// What a transport reports after sending a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    Response(HttpResponse),
    Failure {
        error: TransportError,
        /// The response the server sent alongside the failure, if any.
        response: Option<HttpResponse>,
    },
}

impl TransportOutcome {
    pub fn failure(error: TransportError) -> Self {
        TransportOutcome::Failure {
            error,
            response: None,
        }
    }
}

/// Something that can execute a `TransportRequest`.
pub trait Transport {
    fn send(&self, request: TransportRequest) -> TransportOutcome;
}
