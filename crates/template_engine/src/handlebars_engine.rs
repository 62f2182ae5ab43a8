//! # Handlebars Template Engine
//!
//! Renders deployment descriptors (for example a `docker-compose.yml`) from
//! Handlebars templates, using a registry configuration document as the
//! template context.
//!
//! ## Context
//!
//! Templates see two top-level values:
//!
//! - `config_path`: path of the configuration file, as given
//! - `config`: the parsed configuration root (`common`, `registries`, ...)
//!
//! ## Custom Helpers
//!
//! - `regex_replace value pattern replacement`: replace every match of a
//!   regular expression; capture groups are referenced as `$1` or `${name}`
//! - `registry_name definition [parts]`: short name derived from
//!   `proxy.remoteurl`, empty when none can be derived
//! - `merge base override`: deep merge of two mappings, for use as a
//!   subexpression
//! - `default value fallback`: `fallback` when `value` is null or missing
//!
//! Output is never HTML-escaped.
//!
//! ## Examples
//!
//! ```rust
//! # use template_engine::{HandlebarsTemplateEngine, TemplateContext};
//! # use serde_json::json;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = HandlebarsTemplateEngine::new()?;
//! engine.register_custom_helpers()?;
//!
//! let context = TemplateContext::new(json!({
//!     "config": {
//!         "registries": {
//!             "npm": {"proxy": {"remoteurl": "https://registry.npmjs.org/"}}
//!         }
//!     }
//! }));
//!
//! let template = "{{#each config.registries}}{{@key}}: {{registry_name this}}{{/each}}";
//! let result = engine.render_template(template, &context)?;
//! assert_eq!(result, "npm: npmjs.org");
//! # Ok(())
//! # }
//! ```

use std::{fs, path::Path};

use config_manager::{deep_merge, derive_registry_name, DEFAULT_NAME_PARTS};
use handlebars::{
    Context, Handlebars, Helper, HelperDef, JsonRender, RenderContext, RenderError,
    RenderErrorReason, ScopedJson,
};
use regex::Regex;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::TemplateError;

#[cfg(test)]
#[path = "handlebars_tests.rs"]
mod handlebars_tests;

// ================================
// Custom Handlebars Helpers
// ================================

/// Returns the JSON value of a required helper parameter.
fn required_param<'a>(
    h: &'a Helper<'_>,
    helper: &'static str,
    index: usize,
) -> Result<&'a Value, RenderError> {
    h.param(index)
        .map(|p| p.value())
        .ok_or_else(|| RenderErrorReason::ParamNotFoundForIndex(helper, index).into())
}

/// Returns a required helper parameter as a string.
fn required_str_param<'a>(
    h: &'a Helper<'_>,
    helper: &'static str,
    index: usize,
) -> Result<&'a str, RenderError> {
    required_param(h, helper, index)?.as_str().ok_or_else(|| {
        RenderErrorReason::Other(format!(
            "{helper} helper requires a string at parameter {index}"
        ))
        .into()
    })
}

fn to_yaml(value: &Value) -> Result<serde_yaml::Value, RenderError> {
    serde_yaml::to_value(value).map_err(|e| RenderErrorReason::Other(e.to_string()).into())
}

/// Helper performing a regular-expression replace on a value's text.
struct RegexReplaceHelper;

impl HelperDef for RegexReplaceHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let text = required_param(h, "regex_replace", 0)?.render();
        let pattern = required_str_param(h, "regex_replace", 1)?;
        let replacement = required_str_param(h, "regex_replace", 2)?;

        let regex = Regex::new(pattern).map_err(|e| {
            RenderErrorReason::Other(format!("regex_replace: invalid pattern '{pattern}': {e}"))
        })?;

        let replaced = regex.replace_all(&text, replacement).into_owned();
        Ok(ScopedJson::Derived(Value::String(replaced)))
    }
}

/// Helper deriving a short registry name from a registry definition.
struct RegistryNameHelper;

impl HelperDef for RegistryNameHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let definition = to_yaml(required_param(h, "registry_name", 0)?)?;
        let parts = h
            .param(1)
            .and_then(|p| p.value().as_i64())
            .unwrap_or(DEFAULT_NAME_PARTS);

        let name = derive_registry_name(&definition, parts)
            .map(Value::String)
            .unwrap_or(Value::Null);
        Ok(ScopedJson::Derived(name))
    }
}

/// Helper deep-merging an override mapping onto a base mapping.
struct MergeHelper;

impl HelperDef for MergeHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let base = to_yaml(required_param(h, "merge", 0)?)?;
        let overlay = to_yaml(required_param(h, "merge", 1)?)?;

        let merged = serde_json::to_value(deep_merge(&base, &overlay))
            .map_err(|e| RenderErrorReason::Other(e.to_string()))?;
        Ok(ScopedJson::Derived(merged))
    }
}

/// Helper to provide a fallback for null or undefined values.
struct DefaultHelper;

impl HelperDef for DefaultHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let fallback = required_param(h, "default", 1)?;
        let chosen = match h.param(0) {
            Some(p) if !p.is_value_missing() && !p.value().is_null() => p.value(),
            _ => fallback,
        };
        Ok(ScopedJson::Derived(chosen.clone()))
    }
}

// ================================
// Context and Configuration
// ================================

/// Context for template rendering.
///
/// Variables are stored as JSON so they can be handed to Handlebars
/// directly; nested objects, arrays and scalars are all supported.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    /// All variables available for template rendering.
    pub variables: Value,
}

/// Configuration for template rendering behavior.
#[derive(Debug, Clone)]
pub struct TemplateRenderConfig {
    /// Whether to fail on undefined variables (true) or render them as
    /// empty text (false).
    ///
    /// **Default**: `false`
    pub strict_variables: bool,

    /// Maximum size of template content in bytes.
    ///
    /// **Default**: 1MB (1,048,576 bytes)
    pub max_template_size: usize,
}

impl Default for TemplateRenderConfig {
    fn default() -> Self {
        Self {
            strict_variables: false,
            max_template_size: 1_048_576, // 1MB
        }
    }
}

impl TemplateContext {
    /// Creates a new template context with the provided variables.
    pub fn new(variables: Value) -> Self {
        Self { variables }
    }

    /// Creates the context used to render a deployment file.
    ///
    /// The configuration root is exposed as `config` and the path it was
    /// loaded from as `config_path`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::InvalidContext` if the configuration contains
    /// mapping keys that have no JSON representation.
    pub fn for_config(
        config_path: &str,
        config: &serde_yaml::Value,
    ) -> Result<Self, TemplateError> {
        let config = serde_json::to_value(config).map_err(|e| TemplateError::InvalidContext {
            reason: e.to_string(),
        })?;

        Ok(Self::new(json!({
            "config_path": config_path,
            "config": config,
        })))
    }
}

// ================================
// Engine
// ================================

/// Handlebars template engine with the registry helpers.
///
/// Holds a configured [`Handlebars`] registry. Create it once, register
/// helpers, then render any number of templates.
///
/// ## Examples
///
/// ```rust
/// use template_engine::{HandlebarsTemplateEngine, TemplateContext};
/// use serde_json::json;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut engine = HandlebarsTemplateEngine::new()?;
/// engine.register_custom_helpers()?;
///
/// let context = TemplateContext::new(json!({"name": "docker-hub"}));
/// let result = engine.render_template(
///     r#"{{regex_replace name "-" "_"}}"#,
///     &context,
/// )?;
/// assert_eq!(result, "docker_hub");
/// # Ok(())
/// # }
/// ```
pub struct HandlebarsTemplateEngine {
    handlebars: Handlebars<'static>,
    config: TemplateRenderConfig,
}

impl std::fmt::Debug for HandlebarsTemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlebarsTemplateEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HandlebarsTemplateEngine {
    /// Creates a new engine with default configuration.
    ///
    /// Custom helpers must be registered separately using
    /// `register_custom_helpers()`.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_config(TemplateRenderConfig::default())
    }

    /// Creates a new engine with custom configuration.
    pub fn with_config(config: TemplateRenderConfig) -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(config.strict_variables);
        // Rendered files are YAML, not HTML.
        handlebars.register_escape_fn(handlebars::no_escape);

        Ok(Self { handlebars, config })
    }

    /// Returns the rendering configuration.
    pub fn config(&self) -> &TemplateRenderConfig {
        &self.config
    }

    /// Registers `regex_replace`, `registry_name`, `merge` and `default`.
    pub fn register_custom_helpers(&mut self) -> Result<(), TemplateError> {
        self.handlebars
            .register_helper("regex_replace", Box::new(RegexReplaceHelper));
        self.handlebars
            .register_helper("registry_name", Box::new(RegistryNameHelper));
        self.handlebars.register_helper("merge", Box::new(MergeHelper));
        self.handlebars
            .register_helper("default", Box::new(DefaultHelper));

        Ok(())
    }

    /// Renders a template string with the provided context.
    ///
    /// # Errors
    ///
    /// - `TemplateError::ResourceLimit`: template exceeds the size limit
    /// - `TemplateError::CompilationError`: template syntax is invalid
    /// - `TemplateError::VariableValidation`: undefined variable in strict mode
    /// - `TemplateError::RenderError`: any other rendering failure
    pub fn render_template(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        if template.len() > self.config.max_template_size {
            return Err(TemplateError::ResourceLimit {
                limit_type: "template_size".to_string(),
                message: format!(
                    "Template size {} bytes exceeds limit of {} bytes",
                    template.len(),
                    self.config.max_template_size
                ),
            });
        }

        self.handlebars
            .render_template(template, &context.variables)
            .map_err(classify_render_error)
    }

    /// Reads a template file and renders it with the provided context.
    pub fn render_file(
        &self,
        template_path: &Path,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        debug!(message = "Rendering template file", path = ?template_path);
        let template = fs::read_to_string(template_path)?;
        self.render_template(&template, context)
    }
}

fn classify_render_error(error: RenderError) -> TemplateError {
    let message = error.to_string();
    match error.reason() {
        RenderErrorReason::TemplateError(_) => TemplateError::CompilationError { message },
        RenderErrorReason::MissingVariable(variable) => TemplateError::VariableValidation {
            variable: variable.clone().unwrap_or_else(|| "unknown".to_string()),
            reason: message,
        },
        _ => TemplateError::RenderError { message },
    }
}
