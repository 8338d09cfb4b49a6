//! Mutable request builder and its single-shot `execute`.
//!
//! # Design
//! `RequestBuilder` owns a `RequestConfig` and mutates it in place. Sending
//! is delegated to a `Transport`; the builder only assembles the outgoing
//! `TransportRequest` and decides what the caller sees:
//! - a response, whenever the server answered (any status, including a
//!   failure that carries a response),
//! - `ApiError::Transport`, when no response exists.
//!
//! Nothing is retried. `execute` leaves the stored config untouched; the
//! implicit JSON content type is applied to the outgoing copy only.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RequestConfig;
use crate::error::ApiError;
use crate::headers::{HeaderEntry, Headers};
use crate::http::{HttpMethod, HttpResponse};
use crate::transport::{Transport, TransportOutcome, TransportRequest};
use crate::ureq_transport::UreqTransport;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.2; .NET CLR 1.0.3705;)";

const USER_AGENT: &str = "user-agent";
const CONTENT_TYPE: &str = "content-type";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    config: RequestConfig,
}

impl RequestBuilder {
    pub fn new(url: &str) -> Self {
        Self {
            config: RequestConfig::new(url),
        }
    }

    pub fn with_method(url: &str, method: impl Into<HttpMethod>) -> Self {
        let mut builder = Self::new(url);
        builder.config.method = method.into();
        builder
    }

    /// Adopts `headers` as the builder's header collection.
    pub fn with_headers(url: &str, method: impl Into<HttpMethod>, headers: Headers) -> Self {
        let mut builder = Self::with_method(url, method);
        builder.config.headers = headers;
        builder
    }

    pub fn with_body(
        url: &str,
        method: impl Into<HttpMethod>,
        headers: Headers,
        body: &str,
    ) -> Self {
        let mut builder = Self::with_headers(url, method, headers);
        builder.config.body = body.to_string();
        builder
    }

    pub fn from_config(config: RequestConfig) -> Self {
        Self { config }
    }

    pub fn url(&self) -> &str {
        self.config.url()
    }

    pub fn method(&self) -> &HttpMethod {
        self.config.method()
    }

    pub fn headers(&self) -> &Headers {
        self.config.headers()
    }

    pub fn body(&self) -> &str {
        self.config.body()
    }

    pub fn timeout_secs(&self) -> u64 {
        self.config.timeout_secs()
    }

    pub fn allow_redirects(&self) -> bool {
        self.config.allow_redirects()
    }

    pub fn max_redirects(&self) -> u32 {
        self.config.max_redirects()
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Append `value` to header `key`; an existing value is kept and the
    /// two are comma-joined.
    pub fn add_header(&mut self, key: &str, value: &str) {
        self.config.headers.add(key, value);
    }

    /// Remove every value of header `key` and return what was removed.
    /// An absent key yields an empty entry.
    pub fn remove_header(&mut self, key: &str) -> HeaderEntry {
        self.config.headers.remove(key)
    }

    pub fn clear_headers(&mut self) {
        self.config.headers.clear();
    }

    pub fn set_body(&mut self, body: &str) {
        self.config.body = body.to_string();
    }

    pub fn set_json_body<T: Serialize>(&mut self, value: &T) -> Result<(), ApiError> {
        let body =
            serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        self.config.body = body;
        Ok(())
    }

    /// Adds `agent` to the `user-agent` header with `add_header` semantics,
    /// so a second call appends rather than replaces.
    pub fn set_user_agent(&mut self, agent: &str) {
        self.add_header(USER_AGENT, agent);
    }

    pub fn set_default_user_agent(&mut self) {
        self.set_user_agent(DEFAULT_USER_AGENT);
    }

    /// The current `user-agent` value, or `""` if none is set.
    pub fn user_agent(&self) -> String {
        self.config.headers.get(USER_AGENT).unwrap_or_default()
    }

    /// Seconds to wait for a response; `0` keeps the transport default.
    pub fn set_timeout(&mut self, seconds: u64) {
        self.config.timeout_secs = seconds;
    }

    pub fn enable_redirects(&mut self, max: u32) {
        self.config.allow_redirects = true;
        self.config.max_redirects = max;
    }

    pub fn disable_redirects(&mut self) {
        self.config.allow_redirects = false;
        self.config.max_redirects = 0;
    }

    /// The request `execute` would hand to the transport.
    pub fn to_transport_request(&self) -> TransportRequest {
        let mut headers = self.config.headers.clone();
        let body = if self.config.body.is_empty() {
            None
        } else {
            headers.add(CONTENT_TYPE, JSON_CONTENT_TYPE);
            Some(self.config.body.as_bytes().to_vec())
        };
        TransportRequest {
            url: self.config.url.clone(),
            method: self.config.method.clone(),
            headers,
            body,
            timeout: self.config.timeout(),
            redirects: self.config.redirect_policy(),
        }
    }

    /// Send the request with the default ureq transport.
    pub fn execute(&self) -> Result<HttpResponse, ApiError> {
        self.execute_with(&UreqTransport::new())
    }

    pub fn get_response(&self) -> Result<HttpResponse, ApiError> {
        self.execute()
    }

    pub fn execute_with<T: Transport>(&self, transport: &T) -> Result<HttpResponse, ApiError> {
        let request = self.to_transport_request();
        debug!(
            method = %request.method,
            url = %request.url,
            headers = request.headers.len(),
            body_len = request.body.as_ref().map_or(0, Vec::len),
            "sending request"
        );

        match transport.send(request) {
            TransportOutcome::Response(response) => {
                debug!(status = response.status, "received response");
                Ok(response)
            }
            TransportOutcome::Failure {
                error,
                response: Some(response),
            } => {
                warn!(status = response.status, %error, "transport failed with a response attached");
                Ok(response)
            }
            TransportOutcome::Failure {
                error,
                response: None,
            } => {
                warn!(url = %self.config.url, %error, "transport failed");
                Err(ApiError::Transport(error))
            }
        }
    }
}
