//! Client configuration loading.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. a JSON file (`<config dir>/petland/config.json` unless a path is given)
//! 3. `PETLAND_*` environment variables
//!
//! Command-line overrides are applied by the caller on the returned value.

use std::path::{Path, PathBuf};

use petland_domain::{ClientConfig, DomainError};
use tokio::fs;

use crate::serialization::{SerializationError, from_json_bytes};

/// Overrides the base URL.
pub const ENV_BASE_URL: &str = "PETLAND_BASE_URL";
/// Overrides the request timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "PETLAND_TIMEOUT_MS";
/// Overrides where a remembered session is stored.
pub const ENV_CREDENTIALS_PATH: &str = "PETLAND_CREDENTIALS_PATH";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`ClientConfig`].
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: SerializationError,
    },

    /// An environment variable held an unusable value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// What was wrong.
        message: String,
    },

    /// The merged configuration failed validation.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Loads [`ClientConfig`] from file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader reading the platform default file, if present.
    #[must_use]
    pub const fn new() -> Self {
        Self { path: None }
    }

    /// Reads `path` instead of the default file. The file must exist.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the platform default config file location.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("petland").join("config.json"))
    }

    /// Loads the configuration using the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment override is invalid.
    pub async fn load(&self) -> Result<ClientConfig, ConfigError> {
        self.load_with_env(|key| std::env::var(key).ok()).await
    }

    /// Loads the configuration with a custom environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment override is invalid.
    pub async fn load_with_env(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ClientConfig, ConfigError> {
        let mut config = match &self.path {
            Some(path) => read_file(path).await?,
            None => match Self::default_path() {
                Some(path) if fs::metadata(&path).await.is_ok() => read_file(&path).await?,
                _ => ClientConfig::default(),
            },
        };

        apply_env_overrides(&mut config, lookup)?;
        config.validate()?;
        Ok(config)
    }
}

async fn read_file(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read(path).await.map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = from_json_bytes(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Applies `PETLAND_*` overrides from `lookup` onto `config`.
///
/// # Errors
///
/// Returns an error if a variable is set to an unusable value.
pub fn apply_env_overrides(
    config: &mut ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(raw) = lookup(ENV_BASE_URL) {
        config
            .set_base_url(raw.trim())
            .map_err(|e| ConfigError::InvalidValue {
                key: ENV_BASE_URL,
                message: e.to_string(),
            })?;
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        config.request_timeout_ms =
            raw.trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_MS,
                    message: e.to_string(),
                })?;
    }

    if let Some(raw) = lookup(ENV_CREDENTIALS_PATH) {
        let raw = raw.trim();
        if !raw.is_empty() {
            config.credentials_path = Some(PathBuf::from(raw));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn test_file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"base_url": "https://api.petland.test", "request_timeout_ms": 10000}"#,
        )
        .unwrap();

        let config = ConfigLoader::with_path(&path)
            .load_with_env(env(&[]))
            .await
            .unwrap();

        assert_eq!(config.base_url.as_str(), "https://api.petland.test/");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[tokio::test]
    async fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"base_url": "https://file.petland.test"}"#).unwrap();

        let config = ConfigLoader::with_path(&path)
            .load_with_env(env(&[
                (ENV_BASE_URL, "https://env.petland.test/api"),
                (ENV_TIMEOUT_MS, " 1500 "),
                (ENV_CREDENTIALS_PATH, "/tmp/petland-creds.json"),
            ]))
            .await
            .unwrap();

        assert_eq!(config.base_url.as_str(), "https://env.petland.test/api");
        assert_eq!(config.request_timeout_ms, 1_500);
        assert_eq!(
            config.credentials_path,
            Some(PathBuf::from("/tmp/petland-creds.json"))
        );
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = ConfigLoader::with_path(dir.path().join("nope.json"))
            .load_with_env(env(&[]))
            .await;
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{").unwrap();

        let result = ConfigLoader::with_path(&path).load_with_env(env(&[])).await;
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_bad_env_values() {
        let mut config = ClientConfig::default();
        let result = apply_env_overrides(&mut config, env(&[(ENV_TIMEOUT_MS, "soon")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: ENV_TIMEOUT_MS,
                ..
            })
        ));

        let result = apply_env_overrides(&mut config, env(&[(ENV_BASE_URL, "ftp://x")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: ENV_BASE_URL,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_zero_timeout_fails_validation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let result = ConfigLoader::with_path(&path)
            .load_with_env(env(&[(ENV_TIMEOUT_MS, "0")]))
            .await;
        assert!(matches!(result, Err(ConfigError::Domain(_))));
    }
}
