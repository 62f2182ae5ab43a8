use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while rendering a template.
///
/// These cover reading the template file, building the render context,
/// template syntax problems and failures raised while rendering (including
/// failures reported by custom helpers).
///
/// # Examples
///
/// ```rust
/// use template_engine::{HandlebarsTemplateEngine, TemplateContext, TemplateError};
/// use serde_json::json;
///
/// let engine = HandlebarsTemplateEngine::new().unwrap();
/// let context = TemplateContext::new(json!({}));
///
/// match engine.render_template("{{#if}}", &context) {
///     Err(TemplateError::CompilationError { message }) => println!("syntax: {message}"),
///     Err(e) => println!("other: {e}"),
///     Ok(text) => println!("{text}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum TemplateError {
    /// I/O operation failed while reading the template.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The render context could not be built from the supplied values.
    ///
    /// This happens when a configuration value cannot be represented as
    /// JSON, for example a mapping keyed by a sequence.
    #[error("Invalid template context: {reason}")]
    InvalidContext {
        /// Description of the conversion failure
        reason: String,
    },

    /// Template compilation failed due to syntax errors.
    ///
    /// Examples: `{{#if unclosed block`, `{{invalid.}}`.
    #[error("Template compilation failed: {message}")]
    CompilationError {
        /// Detailed error message from the Handlebars parser
        message: String,
    },

    /// Template rendering failed during execution.
    ///
    /// This covers helper failures such as an invalid `regex_replace`
    /// pattern or a helper called without its required parameters.
    #[error("Template rendering failed: {message}")]
    RenderError {
        /// Detailed error message from the Handlebars renderer
        message: String,
    },

    /// A variable referenced by the template is not defined.
    ///
    /// Only raised when strict variable resolution is enabled.
    #[error("Variable validation failed: {variable} - {reason}")]
    VariableValidation {
        /// Name of the variable that failed validation
        variable: String,
        /// Specific validation failure reason
        reason: String,
    },

    /// Template processing exceeded resource limits.
    #[error("Resource limit exceeded: {limit_type} - {message}")]
    ResourceLimit {
        /// Type of resource limit that was exceeded
        limit_type: String,
        /// Detailed message about the limit violation
        message: String,
    },
}
