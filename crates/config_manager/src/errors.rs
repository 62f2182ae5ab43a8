//! Configuration system error types.
//!
//! Domain-specific errors for loading, shape-checking, merging and
//! assembling registry configuration documents.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration system errors.
///
/// These errors occur when reading YAML files from disk, when a loaded
/// document does not have the `{common, registries}` shape, or when a
/// command refers to a registry that the document does not define.
///
/// I/O failures are carried unchanged so callers see the operating system
/// message.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML file: {path} - {reason}")]
    ParseError { path: String, reason: String },

    #[error("Failed to serialize configuration: {reason}")]
    SerializeError { reason: String },

    #[error("Invalid configuration shape: {field} - {reason}")]
    InvalidConfigShape { field: String, reason: String },

    #[error("Registry '{name}' not found")]
    RegistryNotFound { name: String },

    #[error("Override file must contain a mapping: {path}")]
    InvalidOverrideShape { path: String },
}

impl ConfigurationError {
    /// Creates an [`ConfigurationError::InvalidConfigShape`] for the given field.
    pub fn invalid_shape(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfigShape {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
