//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod credential_repository;
mod file_system;
mod http_client;

pub use clock::Clock;
pub use credential_repository::{CredentialRepository, CredentialStorageError};
pub use file_system::{FileSystem, FileSystemError};
pub use http_client::{HttpClient, HttpClientError};
