//! Parameters describing one HTTP call before it is sent.
//!
//! # Defaults
//! | field             | default          |
//! |-------------------|------------------|
//! | `method`          | `GET`            |
//! | `headers`         | empty            |
//! | `body`            | empty string     |
//! | `timeout_secs`    | `0` (transport default, no explicit timeout) |
//! | `allow_redirects` | `false`          |
//! | `max_redirects`   | `0`              |
//!
//! `url` is fixed at construction. `max_redirects` is always `0` while
//! redirects are disabled, including for configs loaded through serde.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::headers::Headers;
use crate::http::HttpMethod;
use crate::transport::RedirectPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRequestConfig")]
pub struct RequestConfig {
    pub(crate) url: String,
    pub(crate) method: HttpMethod,
    pub(crate) headers: Headers,
    pub(crate) body: String,
    pub(crate) timeout_secs: u64,
    pub(crate) allow_redirects: bool,
    pub(crate) max_redirects: u32,
}

impl RequestConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            method: HttpMethod::Get,
            headers: Headers::new(),
            body: String::new(),
            timeout_secs: 0,
            allow_redirects: false,
            max_redirects: 0,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn allow_redirects(&self) -> bool {
        self.allow_redirects
    }

    pub fn max_redirects(&self) -> u32 {
        self.max_redirects
    }

    /// `None` when no explicit timeout is configured.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn redirect_policy(&self) -> RedirectPolicy {
        RedirectPolicy {
            allow: self.allow_redirects,
            max: self.max_redirects,
        }
    }
}

/// Wire shape accepted by `Deserialize`; missing fields take their defaults.
#[derive(Deserialize)]
struct RawRequestConfig {
    url: String,
    #[serde(default)]
    method: HttpMethod,
    #[serde(default)]
    headers: Headers,
    #[serde(default)]
    body: String,
    #[serde(default)]
    timeout_secs: u64,
    #[serde(default)]
    allow_redirects: bool,
    #[serde(default)]
    max_redirects: u32,
}

impl From<RawRequestConfig> for RequestConfig {
    fn from(raw: RawRequestConfig) -> Self {
        Self {
            url: raw.url,
            method: raw.method,
            headers: raw.headers,
            body: raw.body,
            timeout_secs: raw.timeout_secs,
            allow_redirects: raw.allow_redirects,
            max_redirects: if raw.allow_redirects { raw.max_redirects } else { 0 },
        }
    }
}
