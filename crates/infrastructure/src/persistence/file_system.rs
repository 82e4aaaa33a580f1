//! Real file system implementation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use petland_application::ports::{FileSystem, FileSystemError};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Permissions for files holding session tokens.
#[cfg(unix)]
const PRIVATE_FILE_MODE: u32 = 0o600;

/// File system backed by `tokio::fs`.
///
/// Writes go to a hidden sibling file that is renamed into place.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn classify_io(path: &Path, e: std::io::Error) -> FileSystemError {
    match e.kind() {
        std::io::ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => {
            FileSystemError::PermissionDenied(path.to_path_buf())
        }
        _ => FileSystemError::Io(e),
    }
}

/// Sibling of `path` used while a new version is being written.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(PRIVATE_FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

impl FileSystem for TokioFileSystem {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).await.map_err(|e| classify_io(path, e))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Left over from an interrupted write.
        let staging = staging_path(path);
        match fs::remove_file(&staging).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                return Err(classify_io(&staging, e));
            }
            _ => {}
        }

        if let Err(e) = write_private(&staging, contents).await {
            let _ = fs::remove_file(&staging).await;
            return Err(classify_io(path, e));
        }
        if let Err(e) = fs::rename(&staging, path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(classify_io(path, e));
        }
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::remove_file(path)
            .await
            .map_err(|e| classify_io(path, e))
    }
}
