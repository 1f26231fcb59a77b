//! Canonical JSON and YAML encoding for plans, reports and configs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chi_core::errors::{ChiError, ErrorInfo};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

// Recursively rebuilds objects with keys in sorted order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(key, value)| (key, sort_keys(value)))
                .collect();
            Value::Object(sorted.into_iter().collect::<Map<_, _>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Pretty-printed JSON with object keys sorted at every level.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ChiError> {
    let value = serde_json::to_value(value).map_err(|err| ChiError::serde("json_serialize", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer_pretty(&mut bytes, &sort_keys(value))
        .map_err(|err| ChiError::serde("json_write", err))?;
    Ok(bytes)
}

/// Writes canonical JSON to `path`, replacing any previous file.
pub fn write_canonical_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ChiError> {
    let bytes = to_canonical_json_bytes(value)?;
    fs::write(path, bytes).map_err(|err| {
        ChiError::Io(
            ErrorInfo::new("json_file_write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Hex SHA-256 of the canonical JSON form; insensitive to field order.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, ChiError> {
    let digest = Sha256::digest(to_canonical_json_bytes(value)?);
    Ok(format!("{digest:x}"))
}

/// Parses JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ChiError> {
    serde_json::from_slice(data).map_err(|err| ChiError::serde("json_deserialize", err))
}

/// Renders a value as YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, ChiError> {
    serde_yaml::to_string(value).map_err(|err| ChiError::serde("yaml_serialize", err))
}

/// Parses YAML bytes.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ChiError> {
    serde_yaml::from_slice(data).map_err(|err| ChiError::serde("yaml_deserialize", err))
}
