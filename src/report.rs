//! Progress reporting for generation and verification runs.
//!
//! Both the processor and the verifier talk to a [`Reporter`] instead of
//! printing directly, so their behavior stays observable in tests without
//! capturing standard output.

use console::style;

/// Sink for user-facing status messages.
pub trait Reporter {
    /// Announces the beginning of a unit of work.
    fn step(&self, message: &str);

    /// Reports a completed operation.
    fn success(&self, message: &str);

    /// Reports a recoverable problem; the run continues.
    fn warn(&self, message: &str);

    /// Reports a failure.
    fn error(&self, message: &str);

    /// Echoes an external command before it runs.
    fn command(&self, line: &str);
}

/// Terminal reporter with colored prefixes via the [`console`] crate.
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Prints a bold cyan header with an underline separator.
    pub fn header(&self, text: &str) {
        println!("\n{}", style(text).bold().cyan());
        println!("{}", style("=".repeat(text.len())).dim());
    }

    /// Prints a key-value pair with dimmed key formatting.
    pub fn key_value(&self, key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        ConsoleReporter::new()
    }
}

impl Reporter for ConsoleReporter {
    fn step(&self, message: &str) {
        println!("\n{} {}", style("::").bold().cyan(), message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", style("[OK]").green().bold(), message);
    }

    fn warn(&self, message: &str) {
        println!("{} {}", style("[WARN]").yellow().bold(), message);
    }

    fn error(&self, message: &str) {
        println!("{} {}", style("[ERROR]").red().bold(), message);
    }

    fn command(&self, line: &str) {
        println!("  {} {}", style("$").dim(), style(line).cyan());
    }
}

/// Reporter that discards everything. Used in tests.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn step(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn command(&self, _line: &str) {}
}
