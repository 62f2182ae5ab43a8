//! Layered registry configuration.
//!
//! This crate loads YAML configuration documents of the form
//! `{common, registries}`, merges the common settings with a single
//! registry's override, derives short registry names from upstream URLs,
//! and assembles documents from a common file plus a directory of
//! per-registry override files.
//!
//! Values are represented as [`serde_yaml::Value`] trees; mappings keep
//! their insertion order throughout.

pub mod assembler;
pub mod document;
pub mod errors;
pub mod merger;
pub mod registry_name;
pub mod yaml_io;

// Re-export for convenient access
pub use assembler::{
    assemble, build_config, discover_override_files, read_override_files, OverrideFile,
    OVERRIDE_EXTENSION,
};
pub use document::{registry_key_name, ConfigurationDocument, COMMON_KEY, REGISTRIES_KEY};
pub use errors::{ConfigurationError, ConfigurationResult};
pub use merger::{deep_merge, merge_mappings};
pub use registry_name::{derive_registry_name, hostname_from_url, DEFAULT_NAME_PARTS};
pub use serde_yaml::{Mapping, Value};
pub use yaml_io::{dump_yaml, load_yaml, to_yaml_string, write_text};
