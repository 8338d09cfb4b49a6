//! Error types for the request builder.
//!
//! # Design
//! An HTTP error status is not an error here: whenever the server answered,
//! the caller gets the response. `Transport` is reserved for failures that
//! produced no response at all (DNS, refused connection, timeout, a request
//! the transport could not even form).

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by `RequestBuilder` and `HttpResponse` helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed before any response arrived.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}
