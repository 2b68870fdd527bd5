use std::cell::RefCell;
use std::fs;
use std::path::Path;

use stencil::command::{CommandOutput, CommandRunner};
use stencil::error::Result;
use stencil::report::NullReporter;
use stencil::verify::{venv_bin_dir, venv_python, StageKind, StageStatus, Verifier};
use tempfile::TempDir;

const MANIFEST: &str = r#"[project]
name = "clean-python"
description = "A clean Python project template with best practices"
authors = [{name = "Your Name", email = "your.email@example.com"}]

[project.urls]
Homepage = "https://github.com/YOUR_USERNAME/clean-python"
Repository = "https://github.com/YOUR_USERNAME/clean-python"
Issues = "https://github.com/YOUR_USERNAME/clean-python/issues"
"#;

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn make_template(root: &Path) {
    write_file(&root.join("pyproject.toml"), MANIFEST);
    write_file(&root.join("README.md"), "# clean-python\n");
    write_file(&root.join("Makefile"), "install:\n\tpip install -e '.[dev]'\n");
    write_file(&root.join(".pre-commit-config.yaml"), "repos: []\n");
    write_file(&root.join("mkdocs.yml"), "site_name: clean-python\n");
    write_file(
        &root.join("src/clean_python/__init__.py"),
        "\"\"\"Clean Python package with best practices.\"\"\"\n",
    );
    write_file(
        &root.join("src/clean_python/core.py"),
        "def greet(name):\n    return f\"Hello, {name}!\"\n",
    );
}

fn ok() -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        stdout: String::new(),
        stderr: String::new(),
    }
}

fn ok_with(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn fail(stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        code: Some(2),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// Emulates the external tools of a healthy workflow, with the filesystem
/// side effects the stages check for.
fn healthy(argv: &[String], cwd: &Path) -> CommandOutput {
    let line = argv.join(" ");

    if line.ends_with("-m venv .venv") {
        let venv = cwd.join(".venv");
        fs::create_dir_all(venv_bin_dir(&venv)).unwrap();
        fs::write(venv_bin_dir(&venv).join("activate"), "").unwrap();
        fs::write(venv_python(&venv), "").unwrap();
        return ok();
    }
    if line == "git init" {
        fs::create_dir_all(cwd.join(".git").join("hooks")).unwrap();
        return ok();
    }
    if line == "pre-commit install" {
        fs::write(cwd.join(".git").join("hooks").join("pre-commit"), "#!/bin/sh\n").unwrap();
        return ok();
    }
    if line == "make docs" {
        fs::create_dir_all(cwd.join("site")).unwrap();
        fs::write(cwd.join("site").join("index.html"), "<html></html>\n").unwrap();
        return ok();
    }
    if argv.iter().any(|arg| arg == "-c") {
        let script = argv.last().unwrap();
        if script.contains("import pydantic") {
            return ok_with("pydantic imported successfully\n");
        }
        if script.contains("import pytest") {
            return ok_with("pytest imported successfully\n");
        }
        if script.contains(".core import greet") {
            return ok_with("Hello, World!\nProfile: John\nCalc: 3\n");
        }
    }
    ok()
}

struct FakeRunner {
    calls: RefCell<Vec<Vec<String>>>,
    handler: Box<dyn Fn(&[String], &Path) -> CommandOutput>,
}

impl FakeRunner {
    fn new(handler: impl Fn(&[String], &Path) -> CommandOutput + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    fn ran(&self, line: &str) -> bool {
        self.calls.borrow().iter().any(|argv| argv.join(" ") == line)
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, argv: &[String], cwd: &Path, _env: &[(String, String)]) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(argv.to_vec());
        Ok((self.handler)(argv, cwd))
    }
}

#[test]
fn test_healthy_template_passes_every_stage() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("template");
    make_template(&template);

    let runner = FakeRunner::new(healthy);
    let verifier = Verifier::new(&template, &runner, &NullReporter);
    let report = verifier.verify();

    assert!(report.passed());
    let names: Vec<&str> = report.stages.iter().map(|stage| stage.name).collect();
    assert_eq!(
        names,
        vec![
            "generate",
            "venv",
            "install",
            "install-hooks",
            "format",
            "lint",
            "test",
            "type-check",
            "docs",
            "run-hooks",
            "smoke",
        ]
    );
    assert!(report.stages.iter().all(|stage| stage.passed()));

    let project_dir = report.project_dir.as_ref().unwrap();
    assert_eq!(
        *project_dir,
        template.join("tmp").join("test-integration-project")
    );
    assert!(project_dir.join("pyproject.toml").exists());
    assert!(project_dir.join("src/test_integration_project").is_dir());

    assert!(runner.ran("make install"));
    assert!(runner.ran("make lint"));
    assert!(runner.ran("pre-commit run --all-files"));
}

#[test]
fn test_advisory_failure_does_not_change_the_verdict() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("template");
    make_template(&template);

    let runner = FakeRunner::new(|argv, cwd| {
        if argv.join(" ") == "make lint" {
            return fail("lint errors");
        }
        healthy(argv, cwd)
    });
    let verifier = Verifier::new(&template, &runner, &NullReporter);
    let report = verifier.verify();

    assert!(report.passed());

    let lint = report.stage("lint").unwrap();
    assert_eq!(lint.kind, StageKind::Advisory);
    assert!(matches!(lint.status, StageStatus::Failed(_)));

    // The run continued through the remaining stages.
    assert!(report.stage("type-check").is_some());
    assert!(report.stage("smoke").is_some());
    assert!(report.stage("smoke").unwrap().passed());
}

#[test]
fn test_fatal_failure_stops_the_run() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("template");
    make_template(&template);

    let runner = FakeRunner::new(|argv, cwd| {
        if argv.join(" ").ends_with("-m venv .venv") {
            return fail("no usable python");
        }
        healthy(argv, cwd)
    });
    let verifier = Verifier::new(&template, &runner, &NullReporter);
    let report = verifier.verify();

    assert!(!report.passed());

    let names: Vec<&str> = report.stages.iter().map(|stage| stage.name).collect();
    assert_eq!(names, vec!["generate", "venv"]);

    match &report.stage("venv").unwrap().status {
        StageStatus::Failed(reason) => {
            assert!(reason.contains("exited with status 2"), "{}", reason);
            assert!(reason.contains("no usable python"), "{}", reason);
        }
        StageStatus::Passed => panic!("venv stage should have failed"),
    }
    assert!(report.stage("install").is_none());
}

#[test]
fn test_missing_artifact_fails_generation() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("template");
    make_template(&template);
    fs::remove_file(template.join("Makefile")).unwrap();

    let runner = FakeRunner::new(healthy);
    let verifier = Verifier::new(&template, &runner, &NullReporter);
    let report = verifier.verify();

    assert!(!report.passed());
    assert_eq!(report.stages.len(), 1);

    match &report.stage("generate").unwrap().status {
        StageStatus::Failed(reason) => assert!(reason.contains("Makefile"), "{}", reason),
        StageStatus::Passed => panic!("generation should have failed"),
    }
}

#[test]
fn test_install_probe_checks_import_output() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("template");
    make_template(&template);

    // Install claims success but the pydantic probe prints nothing.
    let runner = FakeRunner::new(|argv, cwd| {
        if argv.iter().any(|arg| arg.contains("import pydantic")) {
            return ok();
        }
        healthy(argv, cwd)
    });
    let verifier = Verifier::new(&template, &runner, &NullReporter);
    let report = verifier.verify();

    assert!(!report.passed());
    match &report.stage("install").unwrap().status {
        StageStatus::Failed(reason) => {
            assert!(reason.contains("pydantic not installed correctly"), "{}", reason)
        }
        StageStatus::Passed => panic!("install should have failed"),
    }
    assert!(report.stage("install-hooks").is_none());
}

#[test]
fn test_smoke_checks_script_output() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("template");
    make_template(&template);

    let runner = FakeRunner::new(|argv, cwd| {
        if argv.iter().any(|arg| arg.contains(".core import greet")) {
            return ok_with("Profile: John\nCalc: 3\n");
        }
        healthy(argv, cwd)
    });
    let verifier = Verifier::new(&template, &runner, &NullReporter);
    let report = verifier.verify();

    assert!(!report.passed());
    match &report.stage("smoke").unwrap().status {
        StageStatus::Failed(reason) => {
            assert!(reason.contains("greeting function not working"), "{}", reason)
        }
        StageStatus::Passed => panic!("smoke should have failed"),
    }
}

#[test]
fn test_stale_scratch_dir_is_reset() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("template");
    make_template(&template);

    // Leftovers from an earlier run must not break generation.
    let stale = template.join("tmp").join("test-integration-project");
    write_file(&stale.join("junk.txt"), "old run\n");

    let runner = FakeRunner::new(healthy);
    let verifier = Verifier::new(&template, &runner, &NullReporter);
    let report = verifier.verify();

    assert!(report.passed());
    assert!(!stale.join("junk.txt").exists());
    assert!(stale.join("pyproject.toml").exists());
}
