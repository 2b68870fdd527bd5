//! Find/replace rules applied to generated files.
//!
//! Rewriting is split from I/O: a [`RewriteRule`] couples a compiled pattern
//! with its replacement, and [`apply_rules`] maps old content to new content
//! without touching the filesystem. The processor decides which file gets
//! which rule set.
//!
//! Every rule set is applied once per run and leaves already-rewritten
//! content unchanged.

use crate::config::ProjectConfig;
use crate::constants::{TEMPLATE_MODULE_NAME, TEMPLATE_PROJECT_NAME};
use crate::error::Result;
use regex::{NoExpand, Regex};

/// A single find/replace operation.
#[derive(Debug)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
    expand: bool,
}

impl RewriteRule {
    /// Builds a rule whose replacement is inserted verbatim.
    pub fn literal(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(RewriteRule {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
            expand: false,
        })
    }

    /// Builds a rule whose replacement may reference capture groups
    /// with `${n}` syntax.
    pub fn expanding(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(RewriteRule {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
            expand: true,
        })
    }

    /// Replaces every match in `content`.
    pub fn apply(&self, content: &str) -> String {
        if self.expand {
            self.pattern
                .replace_all(content, self.replacement.as_str())
                .into_owned()
        } else {
            self.pattern
                .replace_all(content, NoExpand(self.replacement.as_str()))
                .into_owned()
        }
    }
}

/// Applies `rules` in order and returns the rewritten content.
pub fn apply_rules(content: &str, rules: &[RewriteRule]) -> String {
    let mut current = content.to_string();
    for rule in rules {
        current = rule.apply(&current);
    }
    current
}

/// Rules for the project manifest (`pyproject.toml`): package name,
/// description, authors and the project URL table.
pub fn manifest_rules(config: &ProjectConfig) -> Result<Vec<RewriteRule>> {
    Ok(vec![
        RewriteRule::literal(
            &format!(r#"name = "{}""#, TEMPLATE_PROJECT_NAME),
            format!(r#"name = "{}""#, config.project_name),
        )?,
        RewriteRule::literal(
            r#"description = ".*""#,
            format!(r#"description = "{}""#, config.description),
        )?,
        RewriteRule::literal(
            r#"authors = \[\{name = ".*", email = ".*"\}\]"#,
            format!(
                r#"authors = [{{name = "{}", email = "{}"}}]"#,
                config.author_name, config.author_email
            ),
        )?,
        RewriteRule::literal(
            r#"Homepage = ".*""#,
            format!(r#"Homepage = "{}""#, config.repo_url),
        )?,
        RewriteRule::literal(
            r#"Repository = ".*""#,
            format!(r#"Repository = "{}""#, config.repo_url),
        )?,
        RewriteRule::literal(
            r#"Issues = ".*""#,
            format!(r#"Issues = "{}""#, config.issues_url),
        )?,
    ])
}

/// Rules for the package `__init__.py`: docstring and author metadata.
pub fn package_init_rules(config: &ProjectConfig) -> Result<Vec<RewriteRule>> {
    Ok(vec![
        RewriteRule::literal(
            r#""""Clean Python package with best practices\.""""#,
            format!(r#""""{}""""#, config.description),
        )?,
        RewriteRule::literal(
            r#"__author__ = "Your Name""#,
            format!(r#"__author__ = "{}""#, config.author_name),
        )?,
        RewriteRule::literal(
            r#"__email__ = "your\.email@example\.com""#,
            format!(r#"__email__ = "{}""#, config.author_email),
        )?,
    ])
}

/// Rules rewriting imports of the template package to the derived module
/// name. Submodule paths are preserved through the capture group.
pub fn import_rules(module_name: &str) -> Result<Vec<RewriteRule>> {
    Ok(vec![
        RewriteRule::expanding(
            &format!(r"from {}(\.[\w.]+)? import", TEMPLATE_MODULE_NAME),
            format!("from {}${{1}} import", module_name),
        )?,
        RewriteRule::expanding(
            &format!(r"import {}(\.[\w.]+)?", TEMPLATE_MODULE_NAME),
            format!("import {}${{1}}", module_name),
        )?,
    ])
}
