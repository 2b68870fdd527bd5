use std::cell::RefCell;
use std::fs;
use std::path::Path;

use stencil::command::{CommandOutput, CommandRunner};
use stencil::error::Result;
use stencil::git;
use tempfile::TempDir;

struct ScriptedRunner {
    calls: RefCell<Vec<Vec<String>>>,
    fail_matching: Option<&'static str>,
}

impl ScriptedRunner {
    fn succeeding() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_matching: None,
        }
    }

    fn failing_on(fragment: &'static str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_matching: Some(fragment),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, argv: &[String], _cwd: &Path, _env: &[(String, String)]) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(argv.to_vec());
        let fails = self
            .fail_matching
            .map(|fragment| argv.join(" ").contains(fragment))
            .unwrap_or(false);
        Ok(CommandOutput {
            success: !fails,
            code: Some(if fails { 1 } else { 0 }),
            stdout: String::new(),
            stderr: if fails { "boom".to_string() } else { String::new() },
        })
    }
}

#[test]
fn test_discard_history_removes_git_dir() {
    let temp = TempDir::new().unwrap();
    let git_dir = temp.path().join(".git");
    fs::create_dir_all(git_dir.join("refs/heads")).unwrap();
    fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();

    let removed = git::discard_history(temp.path()).unwrap();

    assert!(removed);
    assert!(!git_dir.exists());
}

#[test]
fn test_discard_history_without_git_dir() {
    let temp = TempDir::new().unwrap();

    let removed = git::discard_history(temp.path()).unwrap();

    assert!(!removed);
}

#[test]
fn test_init_repository_invokes_git() {
    let temp = TempDir::new().unwrap();
    let runner = ScriptedRunner::succeeding();

    git::init_repository(&runner, temp.path()).unwrap();

    assert_eq!(*runner.calls.borrow(), vec![vec!["git".to_string(), "init".to_string()]]);
}

#[test]
fn test_initial_commit_stages_then_commits() {
    let temp = TempDir::new().unwrap();
    let runner = ScriptedRunner::succeeding();

    git::initial_commit(&runner, temp.path(), "demo-app").unwrap();

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], vec!["git".to_string(), "add".to_string(), ".".to_string()]);
    assert_eq!(
        calls[1],
        vec![
            "git".to_string(),
            "commit".to_string(),
            "-m".to_string(),
            "Initial project setup for demo-app".to_string(),
        ]
    );
}

#[test]
fn test_failed_command_is_an_error() {
    let temp = TempDir::new().unwrap();
    let runner = ScriptedRunner::failing_on("init");

    let result = git::init_repository(&runner, temp.path());

    let err = result.unwrap_err().to_string();
    assert!(err.contains("git init"), "{}", err);
    assert!(err.contains("boom"), "{}", err);
}

#[test]
fn test_failed_add_skips_commit() {
    let temp = TempDir::new().unwrap();
    let runner = ScriptedRunner::failing_on("add");

    let result = git::initial_commit(&runner, temp.path(), "demo-app");

    assert!(result.is_err());
    // The commit never ran after the failed staging step.
    assert_eq!(runner.calls.borrow().len(), 1);
}
