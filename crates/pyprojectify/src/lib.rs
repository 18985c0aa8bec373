//! pyprojectify: migrate a setuptools package from `setup.py` to `pyproject.toml`.
//!
//! The pipeline has three stages:
//!
//! 1. [`legacy::extract`] parses `setup.py` without executing it and resolves
//!    the keyword arguments of its `setup()` call.
//! 2. [`pyproject::merge`] combines those with `setup.cfg` and `MANIFEST.in`
//!    into a [`pyproject::ProjectDescriptor`].
//! 3. [`pyproject::write`] backs up any existing `pyproject.toml`, writes the
//!    new one atomically, and verifies it round-trips.
//!
//! [`PyProject::migrate`] runs all three for one package directory.

#![deny(clippy::print_stdout, clippy::print_stderr)]

use std::ffi::OsString;
use std::io::IsTerminal;
use std::process::ExitCode;

use anstream::eprintln;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::ExitStatus;
use crate::printer::Printer;

pub mod cli;
pub mod commands;
pub mod error;
pub mod legacy;
pub mod migrate;
pub mod printer;
pub mod pyproject;

pub use error::{ExtractionError, MigrateError};
pub use migrate::{MigrateOptions, Migration, PyProject};

/// Entry point for the pyprojectify CLI.
pub fn main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    setup_logging(cli.verbose, cli.quiet);
    let printer = Printer::new(cli.quiet);

    match commands::migrate::execute(&cli, printer) {
        Ok(status) => status.into(),
        Err(err) => {
            let mut causes = err.chain();
            // An anyhow::Error always has at least one cause (itself).
            if let Some(first) = causes.next() {
                printer.error(&first.to_string());
            }
            for cause in causes {
                eprintln!(
                    "  {}: {}",
                    "Caused by".red().bold(),
                    cause.to_string().trim()
                );
            }
            ExitStatus::Error.into()
        }
    }
}

/// Route `tracing` diagnostics to stderr.
///
/// `RUST_LOG` wins when set; otherwise `-v` raises the level from `warn`.
fn setup_logging(verbosity: u8, quiet: bool) {
    let level = match (quiet, verbosity) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed when `main` is called in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .try_init();
}
