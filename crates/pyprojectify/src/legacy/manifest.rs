//! `MANIFEST.in` reader.

use std::path::Path;

use crate::error::MigrateError;

const INCLUDE_PREFIX: &str = "include ";
const EXCLUDE_PREFIX: &str = "exclude ";

/// The directive lines of a `MANIFEST.in`, trimmed, with blank and comment lines removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Manifest {
    lines: Vec<String>,
}

impl Manifest {
    pub fn from_path(path: &Path) -> Result<Self, MigrateError> {
        let content = fs_err::read_to_string(path).map_err(|err| MigrateError::io(path, err))?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(ToOwned::to_owned)
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Patterns from `include <pattern>` lines.
    pub fn includes(&self) -> Vec<&str> {
        self.directive(INCLUDE_PREFIX)
    }

    /// Patterns from `exclude <pattern>` lines.
    pub fn excludes(&self) -> Vec<&str> {
        self.directive(EXCLUDE_PREFIX)
    }

    fn directive(&self, prefix: &str) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|line| line.strip_prefix(prefix))
            .collect()
    }
}
