//! Credential repository port
//!
//! Durable storage for a remembered session. Only sessions created with the
//! persist flag ever reach this port.

use async_trait::async_trait;
use petland_domain::Credential;

/// Errors that can occur while reading or writing the stored session.
#[derive(Debug, thiserror::Error)]
pub enum CredentialStorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for the persisted session.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Loads the persisted credential.
    ///
    /// # Returns
    /// `None` if nothing has been persisted.
    async fn load(&self) -> Result<Option<Credential>, CredentialStorageError>;

    /// Replaces the persisted credential.
    ///
    /// # Errors
    /// Returns an error if the credential cannot be written.
    async fn save(&self, credential: &Credential) -> Result<(), CredentialStorageError>;

    /// Removes the persisted credential. Removing nothing is not an error.
    ///
    /// # Errors
    /// Returns an error if an existing credential cannot be removed.
    async fn clear(&self) -> Result<(), CredentialStorageError>;
}
