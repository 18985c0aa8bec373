//! Locate the legacy packaging files inside a package directory.

use std::path::{Path, PathBuf};

pub const SETUP_PY: &str = "setup.py";
pub const SETUP_CFG: &str = "setup.cfg";
pub const MANIFEST_IN: &str = "MANIFEST.in";
pub const PYPROJECT_TOML: &str = "pyproject.toml";

/// The well-known packaging files of one package directory.
///
/// Each optional path is `Some` only when the file exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFiles {
    pub package_dir: PathBuf,
    pub setup_py: Option<PathBuf>,
    pub setup_cfg: Option<PathBuf>,
    pub manifest_in: Option<PathBuf>,
    pub pyproject_toml: Option<PathBuf>,
}

impl LegacyFiles {
    /// Probe `package_dir` for each well-known filename.
    pub fn discover(package_dir: &Path) -> Self {
        Self {
            package_dir: package_dir.to_path_buf(),
            setup_py: existing(package_dir, SETUP_PY),
            setup_cfg: existing(package_dir, SETUP_CFG),
            manifest_in: existing(package_dir, MANIFEST_IN),
            pyproject_toml: existing(package_dir, PYPROJECT_TOML),
        }
    }

    /// Where the generated `pyproject.toml` goes.
    pub fn pyproject_target(&self) -> PathBuf {
        self.package_dir.join(PYPROJECT_TOML)
    }
}

fn existing(dir: &Path, name: &str) -> Option<PathBuf> {
    let candidate = dir.join(name);
    candidate.is_file().then_some(candidate)
}
