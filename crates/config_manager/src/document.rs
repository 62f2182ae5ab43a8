//! Registry configuration documents.
//!
//! A configuration document is a YAML mapping with two required top-level
//! mappings:
//!
//! ```yaml
//! common:
//!   image: registry:2
//! registries:
//!   npm:
//!     proxy:
//!       remoteurl: https://registry.npmjs.org/
//! ```
//!
//! `common` holds the settings shared by every registry and `registries`
//! holds one override mapping per registry name. Loading only checks this
//! outer shape; registry definitions are otherwise opaque.

use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument};

use crate::{
    errors::{ConfigurationError, ConfigurationResult},
    merger::deep_merge,
    yaml_io::load_yaml,
};

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

/// Key of the shared configuration section.
pub const COMMON_KEY: &str = "common";

/// Key of the per-registry override section.
pub const REGISTRIES_KEY: &str = "registries";

/// A shape-checked `{common, registries}` configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationDocument {
    /// Settings shared by every registry.
    pub common: Mapping,

    /// Registry name to registry definition.
    pub registries: Mapping,
}

impl ConfigurationDocument {
    /// Creates a document from already separated sections.
    pub fn new(common: Mapping, registries: Mapping) -> Self {
        Self { common, registries }
    }

    /// Validates the shape of a parsed value and extracts its sections.
    ///
    /// Keys other than `common` and `registries` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidConfigShape` if `raw` is not a
    /// mapping, or if either section is missing or is not a mapping.
    pub fn from_value(raw: &Value) -> ConfigurationResult<Self> {
        let root = raw.as_mapping().ok_or_else(|| {
            ConfigurationError::invalid_shape("<root>", "config must be a mapping")
        })?;

        let common = section(root, COMMON_KEY)?;
        let registries = section(root, REGISTRIES_KEY)?;

        Ok(Self::new(common.clone(), registries.clone()))
    }

    /// Loads and shape-checks a configuration file.
    #[instrument]
    pub fn load(path: &Path) -> ConfigurationResult<Self> {
        let raw = load_yaml(path)?;
        let document = Self::from_value(&raw)?;
        debug!(
            message = "Loaded configuration document",
            registries = document.registries.len()
        );
        Ok(document)
    }

    /// Returns the definition of a registry if it exists.
    ///
    /// The value is returned as stored; it is not required to be a mapping.
    pub fn registry(&self, name: &str) -> Option<&Value> {
        self.registries.get(name)
    }

    /// Returns the definition of a registry, requiring it to be a mapping.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::RegistryNotFound` when the registry is
    /// absent or its definition is not a mapping.
    pub fn registry_mapping(&self, name: &str) -> ConfigurationResult<&Mapping> {
        self.registry(name)
            .and_then(Value::as_mapping)
            .ok_or_else(|| ConfigurationError::RegistryNotFound {
                name: name.to_string(),
            })
    }

    /// Merges `common` with the named registry's override.
    pub fn merged_registry(&self, name: &str) -> ConfigurationResult<Value> {
        let registry = self.registry_mapping(name)?;
        Ok(deep_merge(
            &Value::Mapping(self.common.clone()),
            &Value::Mapping(registry.clone()),
        ))
    }

    /// Returns every registry name, sorted lexicographically.
    ///
    /// Non-string keys (numbers, booleans) are rendered to their YAML text.
    pub fn registry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registries.keys().map(registry_key_name).collect();
        names.sort();
        names
    }

    /// Converts the document back into a `{common, registries}` value.
    pub fn to_value(&self) -> Value {
        let mut root = Mapping::new();
        root.insert(
            Value::String(COMMON_KEY.to_string()),
            Value::Mapping(self.common.clone()),
        );
        root.insert(
            Value::String(REGISTRIES_KEY.to_string()),
            Value::Mapping(self.registries.clone()),
        );
        Value::Mapping(root)
    }
}

fn section<'a>(root: &'a Mapping, key: &str) -> ConfigurationResult<&'a Mapping> {
    match root.get(key) {
        Some(Value::Mapping(mapping)) => Ok(mapping),
        Some(_) => Err(ConfigurationError::invalid_shape(key, "must be a mapping")),
        None => Err(ConfigurationError::invalid_shape(key, "missing")),
    }
}

/// Text form of a registry key, as printed by `list-registries`.
pub fn registry_key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
