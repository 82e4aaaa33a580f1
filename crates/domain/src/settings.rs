//! Client configuration model
//!
//! Values that decide where and how the account client talks to the API.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::request::DEFAULT_TIMEOUT_MS;

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration for the account client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every endpoint path is resolved against.
    pub base_url: Url,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Where a remembered session is stored. `None` means the platform default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: concat!("PetLand/", env!("CARGO_PKG_VERSION")).to_string(),
            credentials_path: None,
        }
    }
}

#[allow(clippy::expect_used)] // constant, covered by tests
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

impl ClientConfig {
    /// Parses and sets the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or not http(s).
    pub fn set_base_url(&mut self, raw: &str) -> DomainResult<()> {
        let url = Url::parse(raw).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {raw}",
                url.scheme()
            )));
        }
        self.base_url = url;
        Ok(())
    }

    /// Checks invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero or the base URL is not http(s).
    pub fn validate(&self) -> DomainResult<()> {
        if self.request_timeout_ms == 0 {
            return Err(DomainError::InvalidField {
                field: "request_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(self.base_url.to_string()));
        }
        Ok(())
    }
}
