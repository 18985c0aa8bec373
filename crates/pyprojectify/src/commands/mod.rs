//! Command handlers for pyprojectify.

use std::process::ExitCode;

pub mod migrate;

/// Exit status for pyprojectify.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The migration succeeded.
    Success,

    /// The migration was refused because of the input (e.g. `--strict` without console scripts).
    Failure,

    /// The migration failed with an error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}
