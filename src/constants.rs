//! Common constants used throughout the stencil application.

/// Package name placeholder used by the template (manifest spelling).
pub const TEMPLATE_PROJECT_NAME: &str = "clean-python";

/// Package directory placeholder used by the template (module spelling).
pub const TEMPLATE_MODULE_NAME: &str = "clean_python";

/// Project manifest file name.
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Generated readme file name.
pub const README_FILE: &str = "README.md";

/// Hook configuration consumed by pre-commit.
pub const HOOKS_CONFIG_FILE: &str = ".pre-commit-config.yaml";

/// Documentation generator configuration.
pub const DOCS_CONFIG_FILE: &str = "mkdocs.yml";

/// Build entry points for the generated project.
pub const MAKEFILE: &str = "Makefile";

/// Directory holding the importable package inside the template.
pub const SRC_DIR: &str = "src";

/// CI workflow refreshed after generation, relative to the project root.
pub const CI_WORKFLOW_FILE: &str = ".github/workflows/ci.yml";

/// Entries never copied from the template, matched by base name.
pub const EXCLUDED_ENTRIES: [&str; 10] = [
    ".git",
    "__pycache__",
    ".pytest_cache",
    "*.pyc",
    ".venv",
    "venv",
    "env",
    "htmlcov",
    ".coverage",
    "setup_new_project.py",
];

/// Files that belong to the template itself and are removed from
/// generated projects during cleanup.
pub const TEMPLATE_ONLY_FILES: [&str; 1] = ["setup_new_project.py"];

/// Placeholder owner for repository URLs when no username is given.
pub const USERNAME_PLACEHOLDER: &str = "YOUR_USERNAME";

/// Fallback project description.
pub const DEFAULT_DESCRIPTION: &str = "A clean Python project";

/// Fallback author name.
pub const DEFAULT_AUTHOR: &str = "Your Name";

/// Fallback author email.
pub const DEFAULT_EMAIL: &str = "your.email@example.com";
