//! Request specification type

use url::Url;

use super::{Header, Headers, HttpMethod};

/// Default per-request timeout, matching the transport default.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Complete specification for a single outgoing API call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Fully resolved target URL
    pub url: Url,
    /// HTTP headers
    pub headers: Headers,
    /// JSON request body, if any
    pub body: Option<serde_json::Value>,
    /// Timeout in milliseconds
    pub timeout_ms: u64,
}

impl RequestSpec {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.add(header);
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the URL path, used for logging and routing in fakes.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }
}
