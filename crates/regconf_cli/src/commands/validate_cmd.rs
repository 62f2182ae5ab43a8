//! Validate command module.
//!
//! Checks that a configuration file has the `{common, registries}` shape
//! and that every registry definition is a mapping.

use std::{io::Write, path::PathBuf};

use clap::Args;
use config_manager::{registry_key_name, ConfigurationDocument, ConfigurationError};
use tracing::{error, info, instrument};

use crate::{commands::CommandOutcome, errors::Error};

#[cfg(test)]
#[path = "validate_cmd_tests.rs"]
mod validate_cmd_tests;

/// Command-line arguments for the validate command.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the configuration file (`config.yml`)
    pub config: PathBuf,
}

/// Validate a configuration file.
///
/// Registries whose definition is not a mapping are reported as
/// `RegistryNotFound`, matching what `merge` would report for them.
#[instrument(skip(out))]
pub fn execute(args: &ValidateArgs, out: &mut dyn Write) -> Result<CommandOutcome, Error> {
    let document = ConfigurationDocument::load(&args.config)?;

    for (key, definition) in &document.registries {
        if !definition.is_mapping() {
            let name = registry_key_name(key);
            error!(message = "Registry definition is not a mapping", registry = %name);
            return Err(ConfigurationError::RegistryNotFound { name }.into());
        }
    }

    info!(message = "Configuration is valid", path = ?args.config);
    writeln!(out, "Configuration is valid")?;
    Ok(CommandOutcome::Success)
}
