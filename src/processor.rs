//! Project generation from the template tree.
//!
//! The [`Processor`] owns the whole generation pass: copying the template
//! (minus exclusions), rewriting the manifest and readme, renaming the
//! package directory, rewriting imports and running the optional post-steps
//! (cleanup and git). Rendering engines, external commands and status output
//! are injected so the pass is fully testable.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{
    config::ProjectConfig,
    constants::{
        CI_WORKFLOW_FILE, MANIFEST_FILE, README_FILE, SRC_DIR, TEMPLATE_MODULE_NAME,
        TEMPLATE_ONLY_FILES,
    },
    command::CommandRunner,
    error::{Error, Result},
    exclude::ExclusionSet,
    git,
    renderer::{render_readme, TemplateRenderer},
    report::Reporter,
    rewrite::{apply_rules, import_rules, manifest_rules, package_init_rules, RewriteRule},
};

/// Toggles for the post-generation steps. Every step is best-effort.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Remove template-only files from the generated project.
    pub cleanup: bool,
    /// Remove the template's `.git` directory.
    pub discard_history: bool,
    /// Run `git init` in the generated project.
    pub init_repository: bool,
    /// Stage everything and record the initial commit.
    pub initial_commit: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            cleanup: true,
            discard_history: true,
            init_repository: true,
            initial_commit: true,
        }
    }
}

impl RenderOptions {
    /// Options with every post-step disabled.
    pub fn bare() -> Self {
        RenderOptions {
            cleanup: false,
            discard_history: false,
            init_repository: false,
            initial_commit: false,
        }
    }
}

/// Outcome of a generation pass.
#[derive(Debug)]
pub struct RenderResult {
    /// Where the project was generated.
    pub output_dir: PathBuf,
    /// Whether the package directory was renamed to the derived module name.
    pub module_renamed: bool,
    /// Files whose content was rewritten or regenerated.
    pub rewritten_files: Vec<PathBuf>,
    /// Problems that did not abort the run.
    pub warnings: Vec<String>,
}

/// Drives a single generation pass.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        runner: &'a dyn CommandRunner,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self { engine, runner, reporter }
    }

    /// Generates a project from `template_dir` into `output_dir`.
    ///
    /// # Errors
    /// * `Error::TemplateDoesNotExist` if the template directory is missing
    /// * `Error::DestinationExists` if the output directory already exists;
    ///   the check runs before anything is copied
    /// * `Error::RenameConflict` if the package directory cannot take the
    ///   derived module name
    /// * `Error::IoError` for filesystem failures on declared files
    pub fn render(
        &self,
        template_dir: &Path,
        output_dir: &Path,
        config: &ProjectConfig,
        options: &RenderOptions,
    ) -> Result<RenderResult> {
        if !template_dir.is_dir() {
            return Err(Error::TemplateDoesNotExist {
                template_dir: template_dir.display().to_string(),
            });
        }
        if output_dir.exists() {
            return Err(Error::DestinationExists {
                output_dir: output_dir.display().to_string(),
            });
        }

        let exclusions = ExclusionSet::new()?;

        self.reporter
            .step(&format!("Creating new project at: {}", output_dir.display()));
        copy_tree(template_dir, output_dir, &exclusions)?;
        self.reporter
            .success(&format!("Copied template files to {}", output_dir.display()));

        self.reporter.step("Updating project files");

        let mut rewritten_files = Vec::new();
        let mut warnings = Vec::new();

        let manifest = self.rewrite_manifest(output_dir, config)?;
        self.reporter.success("Updated pyproject.toml");
        rewritten_files.push(manifest);

        let readme = self.write_readme(output_dir, config)?;
        self.reporter.success("Updated README.md");
        rewritten_files.push(readme);

        let module_renamed = self.rename_package(output_dir, config, &mut warnings)?;

        let (updated, import_warnings) = self.rewrite_imports(output_dir, config)?;
        rewritten_files.extend(updated);
        warnings.extend(import_warnings);

        match self.touch_up_workflow(output_dir) {
            Ok(true) => self.reporter.success("Verified GitHub Actions workflow"),
            Ok(false) => {}
            Err(e) => {
                let message = format!("Could not verify GitHub Actions workflow: {}", e);
                self.reporter.warn(&message);
                warnings.push(message);
            }
        }

        if options.cleanup {
            self.cleanup_template_files(output_dir, &mut warnings);
        }

        if options.discard_history {
            match git::discard_history(output_dir) {
                Ok(true) => self.reporter.success("Removed template git history"),
                Ok(false) => {}
                Err(e) => {
                    let message = format!("Could not remove .git directory: {}", e);
                    self.reporter.warn(&message);
                    warnings.push(message);
                }
            }
        }

        if options.init_repository {
            match git::init_repository(self.runner, output_dir) {
                Ok(()) => self.reporter.success("Initialized new git repository"),
                Err(e) => {
                    let message = format!("Could not initialize git repository: {}", e);
                    self.reporter.warn(&message);
                    warnings.push(message);
                }
            }
        }

        if options.initial_commit {
            match git::initial_commit(self.runner, output_dir, &config.project_name) {
                Ok(()) => self.reporter.success("Created initial git commit"),
                Err(e) => {
                    let message = format!("Could not create git commit: {}", e);
                    self.reporter.warn(&message);
                    warnings.push(message);
                }
            }
        }

        Ok(RenderResult {
            output_dir: output_dir.to_path_buf(),
            module_renamed,
            rewritten_files,
            warnings,
        })
    }

    fn rewrite_manifest(&self, output_dir: &Path, config: &ProjectConfig) -> Result<PathBuf> {
        let manifest_path = output_dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&manifest_path)?;
        let rules = manifest_rules(config)?;
        fs::write(&manifest_path, apply_rules(&content, &rules))?;
        Ok(manifest_path)
    }

    fn write_readme(&self, output_dir: &Path, config: &ProjectConfig) -> Result<PathBuf> {
        let readme_path = output_dir.join(README_FILE);
        let content = render_readme(self.engine, config)?;
        fs::write(&readme_path, content)?;
        Ok(readme_path)
    }

    /// Renames `src/clean_python` to the derived module name.
    ///
    /// A missing package directory is a warning, not a failure. A derived
    /// name equal to the template's leaves the tree untouched.
    fn rename_package(
        &self,
        output_dir: &Path,
        config: &ProjectConfig,
        warnings: &mut Vec<String>,
    ) -> Result<bool> {
        let old_path = output_dir.join(SRC_DIR).join(TEMPLATE_MODULE_NAME);
        let new_path = output_dir.join(SRC_DIR).join(&config.module_name);

        if !old_path.exists() {
            let message = format!(
                "Package directory {}/{} not found, skipping rename",
                SRC_DIR, TEMPLATE_MODULE_NAME
            );
            self.reporter.warn(&message);
            warnings.push(message);
            return Ok(false);
        }
        if old_path == new_path {
            debug!("Module name matches the template, no rename needed");
            return Ok(false);
        }
        if new_path.exists() {
            return Err(Error::RenameConflict {
                target: new_path.display().to_string(),
            });
        }

        fs::rename(&old_path, &new_path)?;
        self.reporter.success(&format!(
            "Renamed package: {}/{} -> {}/{}",
            SRC_DIR, TEMPLATE_MODULE_NAME, SRC_DIR, config.module_name
        ));
        Ok(true)
    }

    /// Rewrites imports of the template package across every Python file in
    /// the generated project, plus package metadata in `__init__.py` files.
    /// Returns the updated files and per-file warnings. Applying the pass a
    /// second time changes nothing.
    pub fn rewrite_imports(
        &self,
        output_dir: &Path,
        config: &ProjectConfig,
    ) -> Result<(Vec<PathBuf>, Vec<String>)> {
        let imports = import_rules(&config.module_name)?;
        let init_metadata = package_init_rules(config)?;

        let mut updated = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(output_dir) {
            let entry = entry.map_err(|e| Error::TemplateError(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("py") {
                continue;
            }

            let display = path
                .strip_prefix(output_dir)
                .unwrap_or(path)
                .display()
                .to_string();

            match rewrite_python_file(path, &imports, &init_metadata) {
                Ok(true) => {
                    self.reporter.success(&format!("Updated imports in {}", display));
                    updated.push(path.to_path_buf());
                }
                Ok(false) => {}
                Err(e) => {
                    let message = format!("Could not update imports in {}: {}", display, e);
                    self.reporter.warn(&message);
                    warnings.push(message);
                }
            }
        }

        Ok((updated, warnings))
    }

    /// The workflow file uses generic step names, so it works for any
    /// project name. Checks it survived the copy and is readable.
    fn touch_up_workflow(&self, output_dir: &Path) -> Result<bool> {
        let workflow_path = output_dir.join(CI_WORKFLOW_FILE);
        if !workflow_path.exists() {
            return Ok(false);
        }
        let content = fs::read_to_string(&workflow_path)?;
        if content.trim().is_empty() {
            return Err(Error::TemplateError(format!(
                "{} is empty",
                CI_WORKFLOW_FILE
            )));
        }
        Ok(true)
    }

    fn cleanup_template_files(&self, output_dir: &Path, warnings: &mut Vec<String>) {
        for name in TEMPLATE_ONLY_FILES {
            let path = output_dir.join(name);
            if !path.exists() {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => self.reporter.success(&format!("Removed template file: {}", name)),
                Err(e) => {
                    let message = format!("Could not remove template file {}: {}", name, e);
                    self.reporter.warn(&message);
                    warnings.push(message);
                }
            }
        }
    }
}

/// Copies the template tree into `output_dir`, skipping excluded entries.
/// Exclusion is by base name and excluded directories are never descended
/// into. The destination itself is skipped too, so a destination nested
/// inside the template never copies into itself.
pub fn copy_tree(
    template_dir: &Path,
    output_dir: &Path,
    exclusions: &ExclusionSet,
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let walker = WalkDir::new(template_dir).min_depth(1).into_iter();
    for entry in walker.filter_entry(|e| e.path() != output_dir && !is_excluded(e, exclusions)) {
        let entry = entry.map_err(|e| Error::TemplateError(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .map_err(|e| Error::TemplateError(e.to_string()))?;
        let target = output_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            debug!("Copied {}", relative.display());
        }
    }
    Ok(())
}

fn is_excluded(entry: &walkdir::DirEntry, exclusions: &ExclusionSet) -> bool {
    match entry.file_name().to_str() {
        Some(name) if exclusions.matches(name) => {
            debug!("Skipping excluded entry: {}", entry.path().display());
            true
        }
        _ => false,
    }
}

fn rewrite_python_file(
    path: &Path,
    imports: &[RewriteRule],
    init_metadata: &[RewriteRule],
) -> Result<bool> {
    let content = fs::read_to_string(path)?;
    let mut rewritten = apply_rules(&content, imports);
    if path.file_name().and_then(|n| n.to_str()) == Some("__init__.py") {
        rewritten = apply_rules(&rewritten, init_metadata);
    }
    if rewritten == content {
        return Ok(false);
    }
    fs::write(path, rewritten)?;
    Ok(true)
}
