//! Access token and credential types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::Header;

/// Opaque, non-empty access token issued by the login endpoint.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token string.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyToken`] if the token is empty or whitespace.
    pub fn new(token: impl Into<String>) -> DomainResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(DomainError::EmptyToken);
        }
        Ok(Self(token))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns a short preview (first 8 chars + ...) safe for display.
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.chars().count() > 12 {
            let head: String = self.0.chars().take(8).collect();
            format!("{head}...")
        } else {
            "****".to_string()
        }
    }

    /// Builds the `Authorization` header carrying this token.
    #[must_use]
    pub fn bearer_header(&self) -> Header {
        Header::new("Authorization", format!("Bearer {}", self.0))
    }
}

impl TryFrom<String> for AccessToken {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        Self::new(value)
    }
}

impl From<AccessToken> for String {
    fn from(token: AccessToken) -> Self {
        token.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&"<redacted>").finish()
    }
}

/// The live session: token, persistence choice, and owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Access token sent on authenticated calls.
    pub access_token: AccessToken,
    /// Whether the session should survive a restart.
    pub persist: bool,
    /// Owning user's id, known once the profile has been fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// When the token was stored.
    pub issued_at: DateTime<Utc>,
}

impl Credential {
    /// Creates a credential with no user id yet.
    #[must_use]
    pub const fn new(access_token: AccessToken, persist: bool, issued_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            persist,
            user_id: None,
            issued_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(AccessToken::new(""), Err(DomainError::EmptyToken));
        assert_eq!(AccessToken::new("   "), Err(DomainError::EmptyToken));
        assert!(AccessToken::new("abc").is_ok());
    }

    #[test]
    fn test_bearer_header() {
        let header = AccessToken::new("abc123").unwrap().bearer_header();
        assert_eq!(header.name, "Authorization");
        assert_eq!(header.value, "Bearer abc123");
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = AccessToken::new("super-secret-value").unwrap();
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret-value"));
    }

    #[test]
    fn test_preview() {
        let token = AccessToken::new("abcdefghijklmnop").unwrap();
        assert_eq!(token.preview(), "abcdefgh...");
        assert_eq!(AccessToken::new("short").unwrap().preview(), "****");
    }

    #[test]
    fn test_persisted_credential_rejects_empty_token() {
        let json = r#"{"access_token":"","persist":true,"issued_at":"2024-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<Credential>(json).is_err());
    }

    #[test]
    fn test_credential_json_shape() {
        let issued_at = "2024-01-01T00:00:00Z".parse().unwrap();
        let mut credential = Credential::new(AccessToken::new("tok").unwrap(), true, issued_at);
        credential.user_id = Some("u-1".to_string());

        let json = serde_json::to_value(&credential).unwrap();
        assert_eq!(json["access_token"], "tok");
        assert_eq!(json["user_id"], "u-1");

        let restored: Credential = serde_json::from_value(json).unwrap();
        assert_eq!(restored, credential);
    }
}
