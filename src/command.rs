//! External command execution for stencil.
//!
//! Git plumbing and the verification stages shell out to external tools.
//! They do so through the [`CommandRunner`] trait so the call sites can be
//! exercised in tests with a scripted runner instead of real processes.

use crate::error::{Error, Result};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Captured result of a finished external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Combines captured streams for error reporting.
    pub fn detail(&self) -> String {
        let mut parts = Vec::new();
        if !self.stdout.trim().is_empty() {
            parts.push(format!("stdout:\n{}", self.stdout.trim_end()));
        }
        if !self.stderr.trim().is_empty() {
            parts.push(format!("stderr:\n{}", self.stderr.trim_end()));
        }
        parts.join("\n")
    }
}

/// Trait for running external commands.
///
/// Implementations run `argv` synchronously in `cwd` with `env` overlaid on
/// the parent environment and return the fully captured output. Output is
/// never streamed.
pub trait CommandRunner {
    fn run(&self, argv: &[String], cwd: &Path, env: &[(String, String)]) -> Result<CommandOutput>;
}

/// Runner backed by `std::process::Command`.
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        SystemRunner::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String], cwd: &Path, env: &[(String, String)]) -> Result<CommandOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::CommandError("empty command line".to_string()))?;

        debug!("Running {:?} in {}", argv, cwd.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|e| Error::CommandError(format!("failed to run '{}': {}", program, e)))?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Renders an argv for display, quoting arguments that contain spaces.
pub fn display_argv(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.contains(' ') {
                format!("'{}'", arg)
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds an owned argv from string literals.
pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
