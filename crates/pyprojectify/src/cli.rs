//! CLI argument definitions for pyprojectify.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

use crate::migrate::MigrateOptions;

/// Clap v3-style help menu colors.
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Migrate a setuptools package from setup.py to pyproject.toml.
#[derive(Parser, Debug)]
#[command(
    name = "pyprojectify",
    author,
    version,
    about = "Migrate a setuptools package from setup.py to pyproject.toml.",
    styles = STYLES
)]
pub struct Cli {
    /// The package directory containing setup.py [default: the current directory].
    pub path: Option<PathBuf>,

    /// Fail if no console scripts are declared in setup.py or setup.cfg.
    #[arg(long)]
    pub strict: bool,

    /// Print the generated pyproject.toml instead of writing it.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn migrate_options(&self) -> MigrateOptions {
        MigrateOptions {
            require_entry_points: self.strict,
            dry_run: self.dry_run,
        }
    }
}
