//! Exclusion handling for template copies.
//!
//! The template tree carries entries that must never reach a generated
//! project (version control metadata, caches, virtual environments, the
//! scaffolding script itself). The denylist is fixed and matched against an
//! entry's base name only, so `.git` is skipped at any depth.

use crate::constants::EXCLUDED_ENTRIES;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiled set of entry names excluded from copying.
pub struct ExclusionSet {
    patterns: GlobSet,
}

impl ExclusionSet {
    /// Compiles the default denylist.
    pub fn new() -> Result<Self> {
        Self::from_patterns(&EXCLUDED_ENTRIES)
    }

    /// Compiles an explicit pattern list. Patterns are exact names or
    /// `*`-wildcards matched against base names.
    pub fn from_patterns(patterns: &[&str]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(
                Glob::new(pattern)
                    .map_err(|e| Error::ExcludeError(format!("invalid pattern '{}': {}", pattern, e)))?,
            );
        }
        let patterns = builder
            .build()
            .map_err(|e| Error::ExcludeError(e.to_string()))?;
        Ok(ExclusionSet { patterns })
    }

    /// Tests a single path component. Pure membership check; callers decide
    /// what skipping an entry means.
    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns.is_match(file_name)
    }
}
