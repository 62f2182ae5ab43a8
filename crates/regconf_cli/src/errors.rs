use std::io;

use config_manager::ConfigurationError;
use template_engine::TemplateError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the regconf CLI application.
///
/// Library errors are wrapped unchanged so their messages reach the user as
/// produced by the failing component.
#[derive(Error, Debug)]
pub enum Error {
    /// Loading, validating, merging or assembling configuration failed.
    ///
    /// This covers missing or unreadable files, YAML syntax errors,
    /// documents without the `common`/`registries` mappings, unknown
    /// registries and non-mapping override files.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// Rendering the deployment template failed.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Writing command output to stdout failed, typically because of a
    /// closed pipe. Output files are written through `config_manager` and
    /// fail as [`Error::Config`].
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}
