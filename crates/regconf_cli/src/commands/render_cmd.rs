//! Render-compose command module.
//!
//! Renders a deployment descriptor (typically `docker-compose.yml`) from a
//! Handlebars template. The template sees the configuration file path as
//! `config_path` and the parsed configuration as `config`.

use std::path::PathBuf;

use clap::Args;
use config_manager::{load_yaml, write_text, ConfigurationDocument};
use template_engine::{render_config_template, TemplateRenderConfig};
use tracing::{info, instrument};

use crate::{commands::CommandOutcome, errors::Error};

#[cfg(test)]
#[path = "render_cmd_tests.rs"]
mod render_cmd_tests;

/// Command-line arguments for the render-compose command.
#[derive(Args, Debug, Clone)]
pub struct RenderComposeArgs {
    /// Path to the Handlebars template
    pub template: PathBuf,

    /// Path to the configuration file (`config.yml`)
    pub config: PathBuf,

    /// Output file for the rendered text
    #[arg(short, long)]
    pub output: PathBuf,

    /// Fail when the template references an undefined variable
    #[arg(long)]
    pub strict: bool,
}

/// Execute the render-compose command.
///
/// The configuration must have the `{common, registries}` shape; the whole
/// parsed root, including any extra top-level keys, is passed to the
/// template.
#[instrument]
pub fn execute(args: &RenderComposeArgs) -> Result<CommandOutcome, Error> {
    let raw = load_yaml(&args.config)?;
    ConfigurationDocument::from_value(&raw)?;

    let render_config = TemplateRenderConfig {
        strict_variables: args.strict,
        ..Default::default()
    };
    let rendered = render_config_template(
        &args.template,
        &args.config.display().to_string(),
        &raw,
        render_config,
    )?;

    write_text(&args.output, &rendered)?;
    info!(message = "Rendered template", output = ?args.output);
    Ok(CommandOutcome::Success)
}
