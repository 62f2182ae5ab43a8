//! YAML file I/O.
//!
//! Reads YAML files into [`Value`] trees and writes them back in block
//! style with keys kept in insertion order.

use std::{fs, path::Path};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::errors::{ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "yaml_io_tests.rs"]
mod tests;

/// Loads a YAML file into a structured value.
///
/// A file containing no document (or an explicit `null`) loads as an empty
/// mapping, so an empty override file behaves like `{}`. Merge keys
/// (`<<: *anchor`) are resolved into the surrounding mapping.
///
/// # Errors
///
/// - `ConfigurationError::Io` if the file cannot be read
/// - `ConfigurationError::ParseError` if the content is not valid YAML
pub fn load_yaml(path: &Path) -> ConfigurationResult<Value> {
    debug!(message = "Loading YAML file", path = ?path);

    let content = fs::read_to_string(path)?;
    let parse_error = |e: serde_yaml::Error| ConfigurationError::ParseError {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut value: Value = serde_yaml::from_str(&content).map_err(parse_error)?;
    value.apply_merge().map_err(parse_error)?;

    match value {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        other => Ok(other),
    }
}

/// Serializes a value to YAML text without touching the filesystem.
pub fn to_yaml_string(value: &Value) -> ConfigurationResult<String> {
    serde_yaml::to_string(value).map_err(|e| ConfigurationError::SerializeError {
        reason: e.to_string(),
    })
}

/// Writes a value to `path` as YAML.
///
/// The text is fully serialized before the file is opened, so a
/// serialization failure never leaves a truncated output behind.
pub fn dump_yaml(value: &Value, path: &Path) -> ConfigurationResult<()> {
    let content = to_yaml_string(value)?;
    write_text(path, &content)
}

/// Writes `contents` to `path` in a single call, creating missing parent
/// directories.
pub fn write_text(path: &Path, contents: &str) -> ConfigurationResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, contents)?;
    debug!(message = "Wrote file", path = ?path, bytes = contents.len());
    Ok(())
}
