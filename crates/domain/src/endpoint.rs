//! Endpoint catalog for the account API.
//!
//! Every call the client can make is named by an [`ApiOperation`]; each
//! operation maps to exactly one immutable [`Endpoint`]. Paths are relative
//! and resolved against the configured base URL.

use std::fmt;

use url::Url;

use crate::error::{DomainError, DomainResult};
use crate::request::HttpMethod;

/// A fixed (path, method) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Path relative to the base URL, with a leading slash.
    pub path: &'static str,
    /// HTTP method.
    pub method: HttpMethod,
    /// Whether the call must carry the session's access token.
    pub requires_auth: bool,
}

impl Endpoint {
    const fn public(path: &'static str, method: HttpMethod) -> Self {
        Self {
            path,
            method,
            requires_auth: false,
        }
    }

    const fn authenticated(path: &'static str, method: HttpMethod) -> Self {
        Self {
            path,
            method,
            requires_auth: true,
        }
    }

    /// Resolves this endpoint against a base URL.
    ///
    /// A path prefix on the base (`https://host/api`) is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the base cannot carry a path.
    pub fn url(&self, base: &Url) -> DomainResult<Url> {
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(self.path.trim_start_matches('/'))
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {base}{}", self.path)))
    }
}

/// Logical operations exposed by the account API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Exchange credentials for an access token.
    Login,
    /// Create a new account.
    Register,
    /// Ask the server to email a verification code.
    VerifyEmail,
    /// Submit the code the user received by email.
    SubmitEmailCode,
    /// Fetch the signed-in user's profile.
    GetUser,
    /// Push chat linkage fields for the signed-in user.
    UpdateChatCredentials,
}

const LOGIN: Endpoint = Endpoint::public("/login", HttpMethod::Post);
const REGISTER: Endpoint = Endpoint::public("/registration/new", HttpMethod::Post);
const VERIFY_EMAIL: Endpoint = Endpoint::public("/email/code", HttpMethod::Post);
const SUBMIT_EMAIL_CODE: Endpoint = Endpoint::public("/email/verify", HttpMethod::Post);
const GET_USER: Endpoint = Endpoint::authenticated("/user/info", HttpMethod::Get);
const UPDATE_CHAT_CREDENTIALS: Endpoint =
    Endpoint::authenticated("/user/chat/update", HttpMethod::Patch);

impl ApiOperation {
    /// Returns all operations in catalog order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Login,
            Self::Register,
            Self::VerifyEmail,
            Self::SubmitEmailCode,
            Self::GetUser,
            Self::UpdateChatCredentials,
        ]
    }

    /// Returns the endpoint for this operation.
    #[must_use]
    pub const fn endpoint(self) -> Endpoint {
        match self {
            Self::Login => LOGIN,
            Self::Register => REGISTER,
            Self::VerifyEmail => VERIFY_EMAIL,
            Self::SubmitEmailCode => SUBMIT_EMAIL_CODE,
            Self::GetUser => GET_USER,
            Self::UpdateChatCredentials => UPDATE_CHAT_CREDENTIALS,
        }
    }

    /// Returns a stable kebab-case name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::VerifyEmail => "verify-email",
            Self::SubmitEmailCode => "submit-email-code",
            Self::GetUser => "get-user",
            Self::UpdateChatCredentials => "update-chat-credentials",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_matches_api_surface() {
        let table: Vec<_> = ApiOperation::all()
            .iter()
            .map(|op| {
                let e = op.endpoint();
                (op.as_str(), e.method, e.path, e.requires_auth)
            })
            .collect();

        assert_eq!(
            table,
            vec![
                ("login", HttpMethod::Post, "/login", false),
                ("register", HttpMethod::Post, "/registration/new", false),
                ("verify-email", HttpMethod::Post, "/email/code", false),
                ("submit-email-code", HttpMethod::Post, "/email/verify", false),
                ("get-user", HttpMethod::Get, "/user/info", true),
                ("update-chat-credentials", HttpMethod::Patch, "/user/chat/update", true),
            ]
        );
    }

    #[test]
    fn test_endpoint_is_stable() {
        assert_eq!(ApiOperation::GetUser.endpoint(), ApiOperation::GetUser.endpoint());
    }

    #[test]
    fn test_url_resolution() {
        let base = Url::parse("https://api.petland.test").unwrap();
        let url = ApiOperation::Register.endpoint().url(&base).unwrap();
        assert_eq!(url.as_str(), "https://api.petland.test/registration/new");
    }

    #[test]
    fn test_url_resolution_keeps_base_prefix() {
        let base = Url::parse("https://petland.test/api/v1").unwrap();
        let url = ApiOperation::GetUser.endpoint().url(&base).unwrap();
        assert_eq!(url.as_str(), "https://petland.test/api/v1/user/info");

        let base = Url::parse("https://petland.test/api/v1/").unwrap();
        let url = ApiOperation::Login.endpoint().url(&base).unwrap();
        assert_eq!(url.as_str(), "https://petland.test/api/v1/login");
    }

    #[test]
    fn test_url_resolution_rejects_opaque_base() {
        let base = Url::parse("mailto:someone@petland.test").unwrap();
        let result = ApiOperation::Login.endpoint().url(&base);
        assert!(matches!(result, Err(DomainError::InvalidUrl(_))));
    }
}
