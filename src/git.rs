//! Git plumbing for generated projects.
//!
//! Generated projects start with a fresh repository: the template's history
//! is discarded, a new repository is initialized and the rendered tree goes
//! into an initial commit. All git invocations run through the
//! [`CommandRunner`] so they stay scriptable in tests. Callers treat every
//! failure here as a warning.

use crate::command::{argv, display_argv, CommandRunner};
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Removes the template's `.git` directory from a generated project.
///
/// Returns whether there was history to remove.
pub fn discard_history(project_dir: &Path) -> Result<bool> {
    let git_dir = project_dir.join(".git");
    if !git_dir.is_dir() {
        debug!("No git history at {}", git_dir.display());
        return Ok(false);
    }
    fs::remove_dir_all(&git_dir)?;
    Ok(true)
}

/// Initializes a fresh repository in the generated project.
pub fn init_repository(runner: &dyn CommandRunner, project_dir: &Path) -> Result<()> {
    run_checked(runner, &argv(&["git", "init"]), project_dir)
}

/// Stages the generated tree and records the initial commit.
pub fn initial_commit(
    runner: &dyn CommandRunner,
    project_dir: &Path,
    project_name: &str,
) -> Result<()> {
    run_checked(runner, &argv(&["git", "add", "."]), project_dir)?;
    let message = format!("Initial project setup for {}", project_name);
    run_checked(runner, &argv(&["git", "commit", "-m", &message]), project_dir)
}

fn run_checked(runner: &dyn CommandRunner, command: &[String], cwd: &Path) -> Result<()> {
    let output = runner.run(command, cwd, &[])?;
    if !output.success {
        let reason = if output.stderr.trim().is_empty() {
            output.stdout.trim().to_string()
        } else {
            output.stderr.trim().to_string()
        };
        return Err(Error::CommandError(format!(
            "'{}' failed: {}",
            display_argv(command),
            reason
        )));
    }
    Ok(())
}
