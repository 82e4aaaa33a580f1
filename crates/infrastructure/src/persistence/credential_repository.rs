//! File-based credential repository implementation.
//!
//! A remembered session is stored as a single JSON file, by default
//! `<data dir>/petland/credentials.json`:
//! ```json
//! {
//!   "schema_version": 1,
//!   "credential": {
//!     "access_token": "eyJhbGciOi...",
//!     "persist": true,
//!     "user_id": "u-42",
//!     "issued_at": "2024-05-01T12:00:00Z"
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use petland_application::ports::{CredentialRepository, CredentialStorageError, FileSystem, FileSystemError};
use petland_domain::Credential;
use serde::{Deserialize, Serialize};

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Current on-disk format version.
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    schema_version: u32,
    credential: Credential,
}

/// Credential repository writing to one JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialRepository<F> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> FileCredentialRepository<F> {
    /// Creates a repository storing the session at `path`.
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Returns the platform default location, if the platform has a data dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("petland").join("credentials.json"))
    }

    /// Returns the file this repository writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn serialization_error(e: impl std::fmt::Display) -> CredentialStorageError {
    CredentialStorageError::Serialization(e.to_string())
}

#[async_trait]
impl<F: FileSystem + Sync> CredentialRepository for FileCredentialRepository<F> {
    async fn load(&self) -> Result<Option<Credential>, CredentialStorageError> {
        let content = match self.fs.read_file(&self.path).await {
            Ok(content) => content,
            Err(FileSystemError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(CredentialStorageError::Io(e.into())),
        };

        let stored: StoredCredential = from_json_bytes(&content).map_err(serialization_error)?;
        if stored.schema_version != SCHEMA_VERSION {
            return Err(serialization_error(format!(
                "unsupported schema version {}",
                stored.schema_version
            )));
        }
        Ok(Some(stored.credential))
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStorageError> {
        let stored = StoredCredential {
            schema_version: SCHEMA_VERSION,
            credential: credential.clone(),
        };
        let content = to_json_stable_bytes(&stored).map_err(serialization_error)?;

        self.fs
            .write_file(&self.path, &content)
            .await
            .map_err(|e| CredentialStorageError::Io(e.into()))?;
        tracing::debug!(path = %self.path.display(), "persisted session");
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialStorageError> {
        match self.fs.remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "removed persisted session");
                Ok(())
            }
            Err(FileSystemError::NotFound(_)) => Ok(()),
            Err(e) => Err(CredentialStorageError::Io(e.into())),
        }
    }
}
