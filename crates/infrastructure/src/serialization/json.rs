//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),
}

/// Serializes a value to deterministic JSON bytes.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Fields in declaration order
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use petland_domain::ClientConfig;

    #[test]
    fn test_stable_output_shape() {
        let bytes = to_json_stable_bytes(&ClientConfig::default()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"base_url\": \"http://localhost:8080/\""));
    }

    #[test]
    fn test_config_survives_disk_format() {
        let config = ClientConfig {
            request_timeout_ms: 5_000,
            ..ClientConfig::default()
        };

        let bytes = to_json_stable_bytes(&config).unwrap();
        let restored: ClientConfig = from_json_bytes(&bytes).unwrap();

        assert_eq!(restored, config);
    }

    #[test]
    fn test_invalid_json_is_deserialize_error() {
        let result: Result<ClientConfig, _> = from_json_bytes(b"{\"base_url\": 3}");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
