//! Merge command module.
//!
//! Writes the result of deep-merging `common` with one registry's override
//! to an output file.

use std::path::PathBuf;

use clap::Args;
use config_manager::{dump_yaml, ConfigurationDocument};
use tracing::{info, instrument};

use crate::{commands::CommandOutcome, errors::Error};

#[cfg(test)]
#[path = "merge_cmd_tests.rs"]
mod merge_cmd_tests;

/// Command-line arguments for the merge command.
#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Path to the configuration file (`config.yml`)
    pub config: PathBuf,

    /// Registry key under `registries`
    pub registry: String,

    /// Output file for the merged YAML
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Execute the merge command.
///
/// The output file is written only after the merge succeeded.
#[instrument]
pub fn execute(args: &MergeArgs) -> Result<CommandOutcome, Error> {
    let document = ConfigurationDocument::load(&args.config)?;
    let merged = document.merged_registry(&args.registry)?;

    dump_yaml(&merged, &args.output)?;
    info!(
        message = "Merged registry configuration",
        registry = %args.registry,
        output = ?args.output
    );
    Ok(CommandOutcome::Success)
}
