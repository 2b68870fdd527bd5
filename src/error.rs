//! Error handling for the stencil application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for stencil operations.
///
/// This enum represents all possible errors that can occur while generating
/// or verifying a project. It implements the standard Error trait through
/// thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised by the minijinja engine while rendering
    /// generated documents
    #[error(transparent)]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents invalid find/replace patterns
    #[error("Rewrite pattern error: {0}.")]
    RegexError(#[from] regex::Error),

    /// Represents errors while compiling the exclusion patterns
    #[error("Exclusion pattern error: {0}.")]
    ExcludeError(String),

    /// The template directory cannot be used as a source
    #[error("Template directory does not exist: {template_dir}.")]
    TemplateDoesNotExist { template_dir: String },

    /// The destination already exists; nothing is written
    #[error("Output directory already exists: {output_dir}.")]
    DestinationExists { output_dir: String },

    /// The package directory cannot be renamed because the target is taken
    #[error("Cannot rename package directory: {target} already exists.")]
    RenameConflict { target: String },

    /// A project name is required and none was supplied
    #[error("Project name cannot be empty.")]
    MissingProjectName,

    /// Represents failures while interacting with the user
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents failures to spawn or run an external command
    #[error("Command error: {0}.")]
    CommandError(String),

    /// Represents errors that occur while walking or copying the template tree
    #[error("Template error: {0}.")]
    TemplateError(String),
}

/// Convenience type alias for Results with stencil's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
