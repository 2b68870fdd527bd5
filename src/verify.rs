//! End-to-end verification of the template.
//!
//! The [`Verifier`] generates a throwaway project from the template and
//! drives it through the full development workflow: virtual environment,
//! dependency install, git hooks, quality targets, docs and a smoke import.
//! Stages run strictly in order. A fatal stage failure stops the run; an
//! advisory failure is recorded and the run continues.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    command::{argv, display_argv, CommandOutput, CommandRunner},
    config::ProjectConfig,
    constants::{DOCS_CONFIG_FILE, HOOKS_CONFIG_FILE, MAKEFILE, MANIFEST_FILE, README_FILE, SRC_DIR},
    error::Result,
    processor::{Processor, RenderOptions},
    renderer::MiniJinjaRenderer,
    report::Reporter,
};

/// Directory under the template holding throwaway verification projects.
pub const SCRATCH_DIR: &str = "tmp";

/// Project name used for the generated verification project.
pub const SAMPLE_PROJECT_NAME: &str = "test-integration-project";

/// Whether a stage failure aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Fatal,
    Advisory,
}

/// Result of a single executed stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    Passed,
    Failed(String),
}

/// One executed stage. Stages that never ran do not appear in the report.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub name: &'static str,
    pub kind: StageKind,
    pub status: StageStatus,
}

impl StageOutcome {
    pub fn passed(&self) -> bool {
        matches!(self.status, StageStatus::Passed)
    }
}

/// Accumulated outcome of a verification run.
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub stages: Vec<StageOutcome>,
    /// Where the throwaway project was generated, once generation ran.
    pub project_dir: Option<PathBuf>,
}

impl VerifyReport {
    /// True when every fatal stage that ran passed and none was aborted
    /// early. Advisory failures do not affect the verdict.
    pub fn passed(&self) -> bool {
        self.stages
            .iter()
            .all(|stage| stage.kind == StageKind::Advisory || stage.passed())
    }

    /// Looks up a stage outcome by name.
    pub fn stage(&self, name: &str) -> Option<&StageOutcome> {
        self.stages.iter().find(|stage| stage.name == name)
    }

    fn record(&mut self, name: &'static str, kind: StageKind, status: StageStatus) {
        self.stages.push(StageOutcome { name, kind, status });
    }
}

/// Configuration the verification project is generated with.
pub fn sample_config() -> Result<ProjectConfig> {
    ProjectConfig::new(
        SAMPLE_PROJECT_NAME,
        "Integration test project",
        "Test User",
        "test@example.com",
        Some("testuser".to_string()),
    )
}

type StageResult<T> = std::result::Result<T, String>;

/// Drives the verification stages against a template directory.
pub struct Verifier<'a> {
    template_dir: PathBuf,
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
}

impl<'a> Verifier<'a> {
    pub fn new(
        template_dir: &Path,
        runner: &'a dyn CommandRunner,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            template_dir: template_dir.to_path_buf(),
            runner,
            reporter,
        }
    }

    /// Runs the full stage chain and reports per-stage outcomes.
    pub fn verify(&self) -> VerifyReport {
        let mut report = VerifyReport::default();

        let (project_dir, module_name) =
            match self.fatal(&mut report, "generate", || self.stage_generate()) {
                Some(result) => result,
                None => return report,
            };
        report.project_dir = Some(project_dir.clone());

        let venv_dir = match self.fatal(&mut report, "venv", || self.stage_venv(&project_dir)) {
            Some(dir) => dir,
            None => return report,
        };

        let install = self.fatal(&mut report, "install", || {
            self.stage_install(&project_dir, &venv_dir)
        });
        if install.is_none() {
            return report;
        }

        let hooks = self.fatal(&mut report, "install-hooks", || {
            self.stage_install_hooks(&project_dir, &venv_dir)
        });
        if hooks.is_none() {
            return report;
        }

        for target in ["format", "lint", "test", "type-check"] {
            self.advisory(&mut report, target, || {
                self.stage_make_target(&project_dir, &venv_dir, target)
            });
        }

        self.advisory(&mut report, "docs", || {
            self.stage_docs(&project_dir, &venv_dir)
        });
        self.advisory(&mut report, "run-hooks", || {
            self.stage_run_hooks(&project_dir, &venv_dir)
        });

        self.fatal(&mut report, "smoke", || {
            self.stage_smoke(&project_dir, &venv_dir, &module_name)
        });

        report
    }

    fn fatal<T>(
        &self,
        report: &mut VerifyReport,
        name: &'static str,
        run: impl FnOnce() -> StageResult<T>,
    ) -> Option<T> {
        match run() {
            Ok(value) => {
                report.record(name, StageKind::Fatal, StageStatus::Passed);
                Some(value)
            }
            Err(reason) => {
                self.reporter.error(&format!("{} failed: {}", name, reason));
                report.record(name, StageKind::Fatal, StageStatus::Failed(reason));
                None
            }
        }
    }

    fn advisory(
        &self,
        report: &mut VerifyReport,
        name: &'static str,
        run: impl FnOnce() -> StageResult<()>,
    ) {
        match run() {
            Ok(()) => report.record(name, StageKind::Advisory, StageStatus::Passed),
            Err(reason) => {
                self.reporter.warn(&format!("{} failed: {}", name, reason));
                report.record(name, StageKind::Advisory, StageStatus::Failed(reason));
            }
        }
    }

    /// Generates the throwaway project with the sample configuration and
    /// checks the expected artifacts exist.
    fn stage_generate(&self) -> StageResult<(PathBuf, String)> {
        self.reporter.step("Testing project generation");

        let scratch_dir = self.template_dir.join(SCRATCH_DIR);
        if scratch_dir.exists() {
            fs::remove_dir_all(&scratch_dir).map_err(|e| e.to_string())?;
        }
        fs::create_dir_all(&scratch_dir).map_err(|e| e.to_string())?;
        let project_dir = scratch_dir.join(SAMPLE_PROJECT_NAME);

        let config = sample_config().map_err(|e| e.to_string())?;
        let engine = MiniJinjaRenderer::new();
        let processor = Processor::new(&engine, self.runner, self.reporter);
        processor
            .render(
                &self.template_dir,
                &project_dir,
                &config,
                &RenderOptions::default(),
            )
            .map_err(|e| e.to_string())?;

        for artifact in [
            MANIFEST_FILE,
            MAKEFILE,
            README_FILE,
            HOOKS_CONFIG_FILE,
            DOCS_CONFIG_FILE,
        ] {
            if !project_dir.join(artifact).exists() {
                return Err(format!("{} not found in generated project", artifact));
            }
        }
        let package_dir = project_dir.join(SRC_DIR).join(&config.module_name);
        if !package_dir.is_dir() {
            return Err(format!(
                "package directory {}/{} not found",
                SRC_DIR, config.module_name
            ));
        }

        Ok((project_dir, config.module_name))
    }

    /// Creates the project's virtual environment and checks its layout.
    fn stage_venv(&self, project_dir: &Path) -> StageResult<PathBuf> {
        self.reporter.step("Testing virtual environment creation");

        let venv_dir = project_dir.join(".venv");
        if venv_dir.exists() {
            fs::remove_dir_all(&venv_dir).map_err(|e| e.to_string())?;
        }

        self.run_in(
            project_dir,
            &argv(&[system_python(), "-m", "venv", ".venv"]),
            &[],
        )?;

        if !venv_dir.exists() {
            return Err("virtual environment was not created".to_string());
        }
        if !venv_bin_dir(&venv_dir).join("activate").exists() {
            return Err("activation script not found".to_string());
        }
        if !venv_python(&venv_dir).exists() {
            return Err("python executable not found in venv".to_string());
        }

        Ok(venv_dir)
    }

    /// Installs the project and probes that key packages import.
    fn stage_install(&self, project_dir: &Path, venv_dir: &Path) -> StageResult<()> {
        self.reporter.step("Testing make install");

        let env = venv_env(venv_dir);
        self.run_in(project_dir, &argv(&["make", "install"]), &env)?;

        let python = venv_python(venv_dir).display().to_string();
        for package in ["pydantic", "pytest"] {
            let probe = format!("import {0}; print('{0} imported successfully')", package);
            let output = self.run_in(
                project_dir,
                &[python.clone(), "-c".to_string(), probe],
                &env,
            )?;
            let expected = format!("{} imported successfully", package);
            if !output.stdout.contains(&expected) {
                return Err(format!("{} not installed correctly", package));
            }
        }
        Ok(())
    }

    /// Installs the git hooks and checks they landed.
    fn stage_install_hooks(&self, project_dir: &Path, venv_dir: &Path) -> StageResult<()> {
        self.reporter.step("Testing pre-commit setup");

        let env = venv_env(venv_dir);
        self.run_in(project_dir, &argv(&["pre-commit", "install"]), &env)?;

        let hooks_dir = project_dir.join(".git").join("hooks");
        if !hooks_dir.exists() {
            return Err("git hooks directory not found".to_string());
        }
        if !hooks_dir.join("pre-commit").exists() {
            return Err("pre-commit hook not installed".to_string());
        }
        Ok(())
    }

    fn stage_make_target(
        &self,
        project_dir: &Path,
        venv_dir: &Path,
        target: &str,
    ) -> StageResult<()> {
        self.reporter.step(&format!("Testing make {}", target));
        let env = venv_env(venv_dir);
        self.run_in(project_dir, &argv(&["make", target]), &env)?;
        Ok(())
    }

    /// Builds the docs and checks the rendered site exists.
    fn stage_docs(&self, project_dir: &Path, venv_dir: &Path) -> StageResult<()> {
        self.reporter.step("Testing documentation generation");

        let env = venv_env(venv_dir);
        self.run_in(project_dir, &argv(&["make", "docs"]), &env)?;

        let site_dir = project_dir.join("site");
        if !site_dir.exists() {
            return Err("documentation site directory not created".to_string());
        }
        if !site_dir.join("index.html").exists() {
            return Err("documentation index.html not found".to_string());
        }
        Ok(())
    }

    fn stage_run_hooks(&self, project_dir: &Path, venv_dir: &Path) -> StageResult<()> {
        self.reporter.step("Testing pre-commit execution");
        let env = venv_env(venv_dir);
        self.run_in(project_dir, &argv(&["pre-commit", "run", "--all-files"]), &env)?;
        Ok(())
    }

    /// Imports the generated package and exercises its sample API.
    fn stage_smoke(
        &self,
        project_dir: &Path,
        venv_dir: &Path,
        module_name: &str,
    ) -> StageResult<()> {
        self.reporter.step("Testing Python functionality");

        let env = venv_env(venv_dir);
        let python = venv_python(venv_dir).display().to_string();
        let script = format!(
            "from {module}.core import greet, UserProfile, CalculationResult; \
             print(greet('World')); \
             profile = UserProfile(name='John', email='john@example.com'); \
             print(f'Profile: {{profile.name}}'); \
             calc = CalculationResult(1, 2, 'add', 3); \
             print(f'Calc: {{calc.result}}')",
            module = module_name
        );

        let output = self.run_in(project_dir, &[python, "-c".to_string(), script], &env)?;

        for (needle, what) in [
            ("Hello, World!", "greeting function"),
            ("Profile: John", "UserProfile"),
            ("Calc: 3", "CalculationResult"),
        ] {
            if !output.stdout.contains(needle) {
                return Err(format!("{} not working", what));
            }
        }
        Ok(())
    }

    /// Runs a command, echoes it, and turns any failure into a stage error
    /// carrying the captured output.
    fn run_in(
        &self,
        cwd: &Path,
        command: &[String],
        env: &[(String, String)],
    ) -> StageResult<CommandOutput> {
        self.reporter.command(&display_argv(command));
        let output = self
            .runner
            .run(command, cwd, env)
            .map_err(|e| e.to_string())?;
        if !output.success {
            let mut reason = format!(
                "'{}' exited with {}",
                display_argv(command),
                match output.code {
                    Some(code) => format!("status {}", code),
                    None => "a signal".to_string(),
                }
            );
            let detail = output.detail();
            if !detail.is_empty() {
                reason.push('\n');
                reason.push_str(&detail);
            }
            return Err(reason);
        }
        Ok(output)
    }
}

/// Interpreter used to create the virtual environment.
pub fn system_python() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

/// Directory holding the venv's executables.
pub fn venv_bin_dir(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_dir.join("Scripts")
    } else {
        venv_dir.join("bin")
    }
}

/// Path to the venv's interpreter.
pub fn venv_python(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_bin_dir(venv_dir).join("python.exe")
    } else {
        venv_bin_dir(venv_dir).join("python")
    }
}

/// Environment overlay activating the venv: its executables first on PATH
/// and `VIRTUAL_ENV` set.
pub fn venv_env(venv_dir: &Path) -> Vec<(String, String)> {
    let bin_dir = venv_bin_dir(venv_dir);
    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut paths = vec![bin_dir.clone()];
    paths.extend(std::env::split_paths(&current));
    let path_value = std::env::join_paths(paths)
        .map(|joined| joined.to_string_lossy().into_owned())
        .unwrap_or_else(|_| bin_dir.to_string_lossy().into_owned());

    vec![
        ("PATH".to_string(), path_value),
        ("VIRTUAL_ENV".to_string(), venv_dir.to_string_lossy().into_owned()),
    ]
}
