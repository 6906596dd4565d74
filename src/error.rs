//! Error handling for ui5gen.
//! Defines the error taxonomy and result alias used throughout the generator.

use thiserror::Error;

/// Errors that can occur while resolving answers or projecting templates.
///
/// Validation and registry errors are recovered inside the resolver and never
/// escape it. Template integrity and command failures terminate the run.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Represents errors raised while rendering a template body or path
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Template directory missing or not a directory
    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    /// Two template files resolve to the same destination
    #[error(
        "Template files '{first}' and '{second}' both resolve to '{destination}'."
    )]
    PathCollision { first: String, second: String, destination: String },

    /// Represents errors in answers files or pre-supplied values
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A supplied or entered value failed its field predicate
    #[error("Validation error for '{field}': {message}")]
    ValidationError { field: String, message: String },

    /// The package registry could not provide a version
    #[error("Registry lookup for '{package}' failed: {reason}.")]
    RegistryError { package: String, reason: String },

    /// An external command (npm, git) exited unsuccessfully
    #[error("Command '{command}' failed with status: {status}.")]
    CommandError { command: String, status: String },

    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),
}

/// Convenience type alias for Results with ui5gen's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
