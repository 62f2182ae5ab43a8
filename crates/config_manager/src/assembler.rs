//! Assembles a configuration document from split files.
//!
//! The common settings live in one YAML file and every registry override
//! lives in its own `<name>.yml` file inside a directory. Assembly reads
//! them and produces the raw `{common, registries}` document. Overrides are
//! not merged here; merging happens per registry when a command asks for
//! it.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use glob::{glob, Pattern};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info, instrument};

use crate::{
    document::{ConfigurationDocument, COMMON_KEY},
    errors::{ConfigurationError, ConfigurationResult},
    yaml_io::load_yaml,
};

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod tests;

/// Extension of registry override files.
pub const OVERRIDE_EXTENSION: &str = "yml";

/// One registry override read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideFile {
    /// Registry name, taken from the file stem.
    pub name: String,

    /// Path the override was read from.
    pub path: PathBuf,

    /// Parsed file content.
    pub content: Value,
}

/// Lists the override files of a directory, sorted by file name.
///
/// Only regular files with the `.yml` extension are returned. A missing
/// directory is an I/O error.
pub fn discover_override_files(dir: &Path) -> ConfigurationResult<Vec<PathBuf>> {
    if !fs::metadata(dir)?.is_dir() {
        return Err(ConfigurationError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", dir.display()),
        )));
    }

    // Escape the directory so characters like `[` are matched literally.
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        OVERRIDE_EXTENSION
    );

    let entries = glob(&pattern).map_err(|e| ConfigurationError::ParseError {
        path: pattern.clone(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConfigurationError::Io(e.into()))?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Reads every override file of `dir` in sorted file-name order.
pub fn read_override_files(dir: &Path) -> ConfigurationResult<Vec<OverrideFile>> {
    discover_override_files(dir)?
        .into_iter()
        .map(|path| {
            let content = load_yaml(&path)?;
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(OverrideFile {
                name,
                path,
                content,
            })
        })
        .collect()
}

/// Combines the common settings with per-registry overrides.
///
/// Each override becomes one entry of `registries`, keyed by its name, in
/// the order given. A repeated name replaces the earlier value in place.
///
/// # Errors
///
/// Returns `ConfigurationError::InvalidOverrideShape` for the first
/// override whose content is not a mapping.
pub fn assemble(
    common: Mapping,
    overrides: impl IntoIterator<Item = OverrideFile>,
) -> ConfigurationResult<ConfigurationDocument> {
    let mut registries = Mapping::new();

    for file in overrides {
        match file.content {
            Value::Mapping(definition) => {
                debug!(message = "Adding registry override", registry = %file.name);
                registries.insert(Value::String(file.name), Value::Mapping(definition));
            }
            _ => {
                return Err(ConfigurationError::InvalidOverrideShape {
                    path: file.path.display().to_string(),
                })
            }
        }
    }

    Ok(ConfigurationDocument::new(common, registries))
}

/// Builds a configuration document from a common file and an override
/// directory.
///
/// # Errors
///
/// - `ConfigurationError::InvalidConfigShape` if the common file is not a mapping
/// - `ConfigurationError::InvalidOverrideShape` if an override is not a mapping
/// - `ConfigurationError::Io` / `ParseError` for unreadable files
#[instrument]
pub fn build_config(
    common_path: &Path,
    overrides_dir: &Path,
) -> ConfigurationResult<ConfigurationDocument> {
    let common = match load_yaml(common_path)? {
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(ConfigurationError::invalid_shape(
                COMMON_KEY,
                "common file must contain a mapping",
            ))
        }
    };

    let overrides = read_override_files(overrides_dir)?;
    let document = assemble(common, overrides)?;

    info!(
        message = "Assembled configuration",
        registries = document.registries.len()
    );
    Ok(document)
}
