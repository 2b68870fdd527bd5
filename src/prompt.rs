//! Interactive prompting for stencil.
//!
//! User interaction goes through the [`Prompter`] trait so configuration
//! resolution can be driven by a scripted implementation in tests.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input};

/// Trait for collecting interactive answers.
pub trait Prompter {
    /// Asks for a line of text.
    ///
    /// With a default, an empty answer yields the default. Without one, an
    /// empty answer yields an empty string.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Prompter backed by the dialoguer crate.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let input = Input::new().with_prompt(prompt);
        let input = match default {
            Some(value) => input.default(value.to_string()),
            None => input.allow_empty(true),
        };
        let answer: String = input
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}
