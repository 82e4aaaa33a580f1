//! PetLand Application - Account use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - The credential store and the account service
//! - The account error taxonomy

pub mod account;
pub mod auth;
pub mod error;
pub mod ports;

#[cfg(test)]
mod test_support;

pub use account::{AccountService, classify};
pub use auth::{CredentialStore, NotAuthenticated, SessionStatus};
pub use error::{AccountError, AccountErrorKind, AccountResult, UnderlyingError};
pub use ports::{
    Clock, CredentialRepository, CredentialStorageError, FileSystem, FileSystemError, HttpClient,
    HttpClientError,
};
