//! Request builder that hands HTTP calls to a standard client.
//!
//! # Overview
//! A `RequestBuilder` accumulates the parameters of one HTTP call (URL,
//! method, headers, body, timeout, redirect policy) and `execute` sends it
//! through a `Transport`. The default transport is ureq's blocking client;
//! DNS, TLS, pooling and redirect following all happen there.
//!
//! # Design
//! - Headers are an explicit ordered multimap; a repeated name appends and
//!   is read back comma-joined.
//! - `RequestConfig` spells out every default instead of relying on
//!   zero-initialised fields.
//! - A server that answered always yields `Ok(HttpResponse)`, whatever the
//!   status. Only failures with no response surface as `ApiError`.
//! - The transport sits behind a trait, so the builder can be driven by a
//!   stub in tests.

pub mod builder;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod transport;
pub mod ureq_transport;

pub use builder::{RequestBuilder, DEFAULT_USER_AGENT};
pub use config::RequestConfig;
pub use error::ApiError;
pub use headers::{HeaderEntry, Headers};
pub use http::{HttpMethod, HttpResponse};
pub use transport::{RedirectPolicy, Transport, TransportError, TransportOutcome, TransportRequest};
pub use ureq_transport::UreqTransport;
