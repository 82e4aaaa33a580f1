//! Persistence implementations for file-based storage.

mod credential_repository;
mod file_system;

pub use credential_repository::FileCredentialRepository;
pub use file_system::TokioFileSystem;
