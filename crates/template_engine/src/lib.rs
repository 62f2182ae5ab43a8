//! Template Engine for regconf
//!
//! This crate renders deployment descriptors from Handlebars templates with
//! a registry configuration document as context. See
//! [`handlebars_engine`] for the available context values and helpers.

mod errors;
pub mod handlebars_engine;

pub use errors::TemplateError;
pub use handlebars_engine::{HandlebarsTemplateEngine, TemplateContext, TemplateRenderConfig};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Renders a template file for a configuration document.
///
/// Builds an engine with the custom helpers registered, exposes
/// `config_path` and `config` to the template and returns the rendered
/// text.
///
/// # Errors
///
/// Returns a [`TemplateError`] if the template cannot be read, compiled or
/// rendered, or if the configuration cannot be used as a context.
pub fn render_config_template(
    template_path: &std::path::Path,
    config_path: &str,
    config: &serde_yaml::Value,
    render_config: TemplateRenderConfig,
) -> Result<String, TemplateError> {
    let mut engine = HandlebarsTemplateEngine::with_config(render_config)?;
    engine.register_custom_helpers()?;

    let context = TemplateContext::for_config(config_path, config)?;
    engine.render_file(template_path, &context)
}
