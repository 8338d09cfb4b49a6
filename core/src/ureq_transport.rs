//! `Transport` backed by ureq's blocking client.
//!
//! A fresh agent is configured for every send so the request's timeout and
//! redirect policy apply to that send alone. Status codes are never turned
//! into errors, and hitting the redirect limit hands back the last redirect
//! response. The body is read to the end before `send` returns, which
//! releases the connection on every path. A body that cannot be read in
//! full is a failure with no response; a truncated body is never returned.

use std::io;

use tracing::debug;
use ureq::http;

use crate::headers::Headers;
use crate::http::HttpResponse;
use crate::transport::{Transport, TransportError, TransportOutcome, TransportRequest};

#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn agent(request: &TransportRequest) -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .max_redirects(request.redirects.max_hops())
            .max_redirects_will_error(false)
            .timeout_global(request.timeout)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: TransportRequest) -> TransportOutcome {
        let agent = Self::agent(&request);

        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        let sent = match request.body {
            Some(body) => builder.body(body).map(|req| agent.run(req)),
            None => builder.body(()).map(|req| agent.run(req)),
        };

        let response = match sent {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return TransportOutcome::failure(map_error(e)),
            Err(e) => {
                return TransportOutcome::failure(TransportError::InvalidRequest(e.to_string()))
            }
        };

        let (parts, mut body) = response.into_parts();
        let mut headers = Headers::new();
        for (name, value) in parts.headers.iter() {
            headers.add(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
        }
        let status = parts.status.as_u16();
        debug!(status, headers = headers.len(), "response head received");

        // No size cap: the body is handed to the caller in full.
        match body.with_config().limit(u64::MAX).read_to_vec() {
            Ok(body) => TransportOutcome::Response(HttpResponse {
                status,
                headers,
                body,
            }),
            Err(e) => TransportOutcome::failure(map_error(e)),
        }
    }
}

fn map_error(error: ureq::Error) -> TransportError {
    match error {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            TransportError::Connect(error.to_string())
        }
        ureq::Error::BadUri(uri) => TransportError::InvalidRequest(uri),
        ureq::Error::Http(e) => TransportError::InvalidRequest(e.to_string()),
        ureq::Error::Io(e) => map_io_error(e),
        other => TransportError::Other(other.to_string()),
    }
}

fn map_io_error(error: io::Error) -> TransportError {
    match error.kind() {
        io::ErrorKind::TimedOut => TransportError::Timeout,
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable => TransportError::Connect(error.to_string()),
        _ => TransportError::Io(error.to_string()),
    }
}
