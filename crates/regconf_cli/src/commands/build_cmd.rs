//! Build-config command module.
//!
//! Assembles a `{common, registries}` configuration file from a common
//! settings file and a directory of `<registry>.yml` override files.
//! Overrides are stored unmerged; use `merge` to resolve one registry.

use std::path::PathBuf;

use clap::Args;
use config_manager::{build_config, dump_yaml};
use tracing::{info, instrument};

use crate::{commands::CommandOutcome, errors::Error};

#[cfg(test)]
#[path = "build_cmd_tests.rs"]
mod build_cmd_tests;

/// Command-line arguments for the build-config command.
#[derive(Args, Debug, Clone)]
pub struct BuildConfigArgs {
    /// Path to the common settings file
    pub common: PathBuf,

    /// Directory containing one `<registry>.yml` file per registry
    pub custom_dir: PathBuf,

    /// Output file for the combined configuration
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Execute the build-config command.
#[instrument]
pub fn execute(args: &BuildConfigArgs) -> Result<CommandOutcome, Error> {
    let document = build_config(&args.common, &args.custom_dir)?;

    dump_yaml(&document.to_value(), &args.output)?;
    info!(
        message = "Wrote combined configuration",
        registries = document.registries.len(),
        output = ?args.output
    );
    Ok(CommandOutcome::Success)
}
