use std::io::{self, Write};

use clap::{Parser, Subcommand};
use regconf_cli::{
    commands::{
        build_cmd::{self, BuildConfigArgs},
        list_cmd::{self, ListRegistriesArgs},
        merge_cmd::{self, MergeArgs},
        registry_name_cmd::{self, RegistryNameArgs},
        render_cmd::{self, RenderComposeArgs},
        validate_cmd::{self, ValidateArgs},
        CommandOutcome, ERROR_EXIT_CODE,
    },
    errors::Error,
    logging,
};
use tracing::debug;

/// regconf: Build and inspect layered registry mirror configurations
#[derive(Parser)]
#[command(name = "regconf", version)]
#[command(
    about = "Build and inspect layered registry mirror configurations",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge common settings with one registry's override
    Merge(MergeArgs),

    /// Print a short name derived from a registry's upstream URL
    RegistryName(RegistryNameArgs),

    /// List the configured registries, sorted by name
    ListRegistries(ListRegistriesArgs),

    /// Combine a common file and a directory of overrides into one config
    BuildConfig(BuildConfigArgs),

    /// Render a deployment descriptor from a template
    RenderCompose(RenderComposeArgs),

    /// Check the shape of a configuration file
    Validate(ValidateArgs),
}

fn run(command: &Commands) -> Result<CommandOutcome, Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match command {
        Commands::Merge(args) => merge_cmd::execute(args)?,
        Commands::RegistryName(args) => registry_name_cmd::execute(args, &mut out)?,
        Commands::ListRegistries(args) => list_cmd::execute(args, &mut out)?,
        Commands::BuildConfig(args) => build_cmd::execute(args)?,
        Commands::RenderCompose(args) => render_cmd::execute(args)?,
        Commands::Validate(args) => validate_cmd::execute(args, &mut out)?,
    };

    out.flush()?;
    Ok(outcome)
}

fn main() {
    logging::init();

    let cli = Cli::parse();
    match run(&cli.command) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            debug!(message = "Command failed", error = ?e);
            eprintln!("Error: {e}");
            std::process::exit(ERROR_EXIT_CODE);
        }
    }
}
