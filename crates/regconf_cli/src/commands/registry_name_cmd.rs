//! Registry name command module.
//!
//! Prints the short name of a registry, derived from the host of its
//! `proxy.remoteurl`. A registry without a usable URL prints nothing and
//! yields [`CommandOutcome::NoDerivableName`].

use std::{io::Write, path::PathBuf};

use clap::Args;
use config_manager::{derive_registry_name, ConfigurationDocument, Value, DEFAULT_NAME_PARTS};
use tracing::{debug, instrument};

use crate::{commands::CommandOutcome, errors::Error};

#[cfg(test)]
#[path = "registry_name_cmd_tests.rs"]
mod registry_name_cmd_tests;

/// Command-line arguments for the registry-name command.
#[derive(Args, Debug, Clone)]
pub struct RegistryNameArgs {
    /// Path to the configuration file (`config.yml`)
    pub config: PathBuf,

    /// Registry key under `registries`
    pub registry: String,

    /// Number of trailing domain parts to keep (values below 1 count as 1)
    #[arg(long, default_value_t = DEFAULT_NAME_PARTS, allow_negative_numbers = true)]
    pub parts: i64,
}

/// Execute the registry-name command, printing the name to `out`.
///
/// An unknown registry is not an error; like a registry without a URL it
/// has no derivable name.
#[instrument(skip(out))]
pub fn execute(args: &RegistryNameArgs, out: &mut dyn Write) -> Result<CommandOutcome, Error> {
    let document = ConfigurationDocument::load(&args.config)?;
    let missing = Value::Null;
    let definition = document.registry(&args.registry).unwrap_or(&missing);

    match derive_registry_name(definition, args.parts) {
        Some(name) => {
            writeln!(out, "{name}")?;
            Ok(CommandOutcome::Success)
        }
        None => {
            debug!(message = "No derivable registry name", registry = %args.registry);
            Ok(CommandOutcome::NoDerivableName)
        }
    }
}
