//! stencil stamps out new Python projects from the clean-python template.
//! It copies the template tree, rewrites project metadata and imports for
//! the chosen name, reinitializes version control, and can drive a
//! generated project through the full development workflow to verify the
//! template still works end to end.

/// Command-line interface module for the stencil application
pub mod cli;

/// External command execution behind a scriptable trait
pub mod command;

/// Project configuration and module-name derivation
pub mod config;

/// Common constants: template placeholders, artifact names, exclusions
pub mod constants;

/// Error types and handling for the stencil application
pub mod error;

/// Exclusion patterns applied while copying the template tree
pub mod exclude;

/// Git history reset and initial-commit plumbing
pub mod git;

/// Core generation orchestration
/// Combines all components to produce the final project
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering for generated documents
pub mod renderer;

/// Progress reporting for generation and verification
pub mod report;

/// Find/replace rules for manifest, package metadata and imports
pub mod rewrite;

/// End-to-end verification of the template
pub mod verify;
