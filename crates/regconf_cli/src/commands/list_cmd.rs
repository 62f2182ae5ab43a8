use std::{io::Write, path::PathBuf};

use clap::Args;
use config_manager::ConfigurationDocument;
use tracing::instrument;

use crate::{commands::CommandOutcome, errors::Error};

#[cfg(test)]
#[path = "list_cmd_tests.rs"]
mod list_cmd_tests;

/// Command-line arguments for the list-registries command.
#[derive(Args, Debug, Clone)]
pub struct ListRegistriesArgs {
    /// Path to the configuration file (`config.yml`)
    pub config: PathBuf,
}

/// Print every registry key, one per line, sorted lexicographically.
#[instrument(skip(out))]
pub fn execute(args: &ListRegistriesArgs, out: &mut dyn Write) -> Result<CommandOutcome, Error> {
    let document = ConfigurationDocument::load(&args.config)?;

    for name in document.registry_names() {
        writeln!(out, "{name}")?;
    }
    Ok(CommandOutcome::Success)
}
