//! Account error types
//!
//! [`AccountError`] is the closed set of failures callers branch on. Server
//! outcomes are mapped onto it by the classifier; `NotAuthenticated` is the
//! one kind raised locally, before any request is sent.

use petland_domain::StatusCode;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Failures surfaced by account operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The server rejected the login or verification code.
    #[error("invalid login or password")]
    InvalidCredentials,

    /// Registration conflicted with an existing account.
    #[error("an account with this email already exists")]
    AccountAlreadyExists,

    /// The server rejected the session's token.
    #[error("session is not authorized")]
    Unauthorized,

    /// The server reported an internal error.
    #[error("server is unavailable")]
    ServerUnavailable,

    /// No session is stored; the call was not attempted.
    #[error("not signed in")]
    NotAuthenticated,

    /// Anything else, with the underlying cause kept for diagnostics.
    #[error("unexpected failure: {0}")]
    Unknown(#[source] UnderlyingError),
}

/// Underlying cause carried by [`AccountError::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnderlyingError {
    /// A non-2xx status with no specific meaning for the operation.
    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// Status returned by the server.
        status: StatusCode,
        /// Response body, truncated.
        body: String,
    },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] HttpClientError),

    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Reading or writing the persisted session failed.
    #[error("credential storage failed: {0}")]
    Storage(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AccountError {
    /// Returns the kind of this error, for UI branching.
    #[must_use]
    pub const fn kind(&self) -> AccountErrorKind {
        match self {
            Self::InvalidCredentials => AccountErrorKind::InvalidCredentials,
            Self::AccountAlreadyExists => AccountErrorKind::AccountAlreadyExists,
            Self::Unauthorized => AccountErrorKind::Unauthorized,
            Self::ServerUnavailable => AccountErrorKind::ServerUnavailable,
            Self::NotAuthenticated => AccountErrorKind::NotAuthenticated,
            Self::Unknown(_) => AccountErrorKind::Unknown,
        }
    }
}

impl From<UnderlyingError> for AccountError {
    fn from(cause: UnderlyingError) -> Self {
        Self::Unknown(cause)
    }
}

/// Field-less mirror of [`AccountError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountErrorKind {
    /// See [`AccountError::InvalidCredentials`].
    InvalidCredentials,
    /// See [`AccountError::AccountAlreadyExists`].
    AccountAlreadyExists,
    /// See [`AccountError::Unauthorized`].
    Unauthorized,
    /// See [`AccountError::ServerUnavailable`].
    ServerUnavailable,
    /// See [`AccountError::NotAuthenticated`].
    NotAuthenticated,
    /// See [`AccountError::Unknown`].
    Unknown,
}

impl AccountErrorKind {
    /// Returns the message shown to the user for this kind.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Wrong email or password.",
            Self::AccountAlreadyExists => "An account with this email already exists.",
            Self::Unauthorized => "Authorization failed. Please sign in again.",
            Self::ServerUnavailable => "Cannot reach the server. Please try again later.",
            Self::NotAuthenticated => "You are not signed in.",
            Self::Unknown => "Something went wrong.",
        }
    }

    /// Returns true if the user should be sent back to the sign-in screen.
    #[must_use]
    pub const fn requires_sign_in(self) -> bool {
        matches!(self, Self::Unauthorized | Self::NotAuthenticated)
    }
}

/// Result type alias for account operations.
pub type AccountResult<T> = Result<T, AccountError>;
