//! User-facing status output.
//!
//! Diagnostics go through `tracing`; the [`Printer`] only carries what the
//! user asked for: a status line per migration, warnings, errors, and the
//! generated document on `--dry-run`.

use anstream::{eprintln, println};
use owo_colors::OwoColorize;

#[derive(Copy, Clone)]
pub struct Printer {
    quiet: bool,
}

impl Printer {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// A neutral status line on stderr.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// A highlighted completion line on stderr, e.g. `Migrated pkg/pyproject.toml`.
    pub fn success(&self, verb: &str, subject: &str) {
        if !self.quiet {
            eprintln!("{} {subject}", verb.green().bold());
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}: {message}", "warning".yellow().bold());
        }
    }

    /// Errors ignore `--quiet`.
    pub fn error(&self, message: &str) {
        eprintln!("{}: {message}", "error".red().bold());
    }

    /// A generated document on stdout; printed even with `--quiet` since it is the requested output.
    pub fn document(&self, content: &str) {
        println!("{}", content.trim_end());
    }
}
