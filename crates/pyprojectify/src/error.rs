//! Error types for the migration pipeline.
//!
//! Every stage returns [`MigrateError`]. Nothing is retried or swallowed: the
//! caller decides how to map a failure onto a process exit code.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A failure anywhere in the `setup.py` -> `pyproject.toml` pipeline.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// The required `setup.py` is absent.
    #[error("No setup.py found in {}", path.display())]
    NotFound { path: PathBuf },

    /// `setup.py` is not valid Python.
    #[error("Failed to parse {}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A supplementary file (`setup.cfg`) is not valid for its format.
    #[error("Failed to parse {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// No usable `setup()` call in `setup.py`.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// No console scripts were declared and `--strict` was requested.
    #[error("No `entry_points.console_scripts` declared in setup.py or setup.cfg")]
    MissingEntryPoints,

    /// A read or write failed.
    #[error("Failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The written `pyproject.toml` does not read back to the same data.
    #[error("Generated {} failed validation: {message}", path.display())]
    Validation { path: PathBuf, message: String },
}

impl MigrateError {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Why the build-declaration call could not be located.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No top-level `setup()` call found in setup.py")]
    NotFound,

    #[error("Found {count} top-level `setup()` calls in setup.py; expected exactly one")]
    Ambiguous { count: usize },
}
