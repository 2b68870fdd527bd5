//! Project configuration for stencil.
//!
//! A [`ProjectConfig`] captures everything a generation run needs: the
//! project name, the module identifier derived from it, author metadata and
//! the repository URLs. Values missing from the command line are collected
//! interactively through the [`Prompter`] seam.

use crate::cli::Args;
use crate::constants::{
    DEFAULT_AUTHOR, DEFAULT_DESCRIPTION, DEFAULT_EMAIL, USERNAME_PLACEHOLDER,
};
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use serde::Serialize;

/// Resolved settings for a single generation run.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectConfig {
    /// Human-facing project name, e.g. `my-awesome-project`.
    pub project_name: String,
    /// Importable module identifier derived from the project name.
    pub module_name: String,
    /// One-line project description.
    pub description: String,
    /// Author name written into the manifest and package metadata.
    pub author_name: String,
    /// Author email written into the manifest and package metadata.
    pub author_email: String,
    /// GitHub username, when known. Absent means the repository URLs carry
    /// a placeholder owner.
    pub github_username: Option<String>,
    /// Repository URL derived from the username and project name.
    pub repo_url: String,
    /// Issue tracker URL derived from the repository URL.
    pub issues_url: String,
}

impl ProjectConfig {
    /// Builds a configuration from resolved values, deriving the module
    /// name and repository URLs.
    ///
    /// # Errors
    /// * `Error::MissingProjectName` if the trimmed name is empty
    pub fn new(
        project_name: impl Into<String>,
        description: impl Into<String>,
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        github_username: Option<String>,
    ) -> Result<Self> {
        let project_name = project_name.into().trim().to_string();
        if project_name.is_empty() {
            return Err(Error::MissingProjectName);
        }

        let module_name = derive_module_name(&project_name);
        let owner = github_username
            .as_deref()
            .unwrap_or(USERNAME_PLACEHOLDER)
            .to_string();
        let repo_url = format!("https://github.com/{}/{}", owner, project_name);
        let issues_url = format!("{}/issues", repo_url);

        Ok(ProjectConfig {
            project_name,
            module_name,
            description: description.into(),
            author_name: author_name.into(),
            author_email: author_email.into(),
            github_username,
            repo_url,
            issues_url,
        })
    }

    /// Render context for generated documents.
    pub fn context(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Derives an importable module identifier from a project name.
///
/// The name is lowercased, every character outside `[a-z0-9_]` becomes an
/// underscore, and a leading digit is replaced so the result is always a
/// valid identifier. Total: any input maps to some identifier.
pub fn derive_module_name(project_name: &str) -> String {
    let mut module: String = project_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if module.is_empty() {
        return "_".to_string();
    }
    if module.as_bytes()[0].is_ascii_digit() {
        module.replace_range(0..1, "_");
    }
    module
}

/// Resolves the full configuration from arguments, prompting for anything
/// missing. Flags that skip confirmations do not skip field prompts.
pub fn resolve_config(args: &Args, prompter: &dyn Prompter) -> Result<ProjectConfig> {
    let project_name = match provided(&args.name) {
        Some(name) => name,
        None => prompter.input("Project name (e.g. my-awesome-project)", None)?,
    };

    let description = match provided(&args.description) {
        Some(description) => description,
        None => prompter.input("Project description", Some(DEFAULT_DESCRIPTION))?,
    };

    let author_name = match provided(&args.author) {
        Some(author) => author,
        None => prompter.input("Author name", Some(DEFAULT_AUTHOR))?,
    };

    let author_email = match provided(&args.email) {
        Some(email) => email,
        None => prompter.input("Author email", Some(DEFAULT_EMAIL))?,
    };

    // An explicitly given empty username is respected; only an absent flag
    // triggers the prompt.
    let github_username = match &args.github {
        Some(_) => provided(&args.github),
        None => {
            let answer = prompter.input("GitHub username (optional)", None)?;
            let answer = answer.trim();
            if answer.is_empty() {
                None
            } else {
                Some(answer.to_string())
            }
        }
    };

    ProjectConfig::new(
        project_name,
        description,
        author_name,
        author_email,
        github_username,
    )
}

fn provided(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
