//! End-to-end migration of one package directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::MigrateError;
use crate::legacy::{LegacyFiles, Manifest, SetupCfg, setup_py};
use crate::pyproject::{self, MergeOptions, ProjectDescriptor};

/// Settings for a single migration run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrateOptions {
    /// Treat a package without console scripts as an error.
    pub require_entry_points: bool,
    /// Build the descriptor but leave the filesystem untouched.
    pub dry_run: bool,
}

/// Summary of a completed migration.
#[derive(Debug, Clone)]
pub struct Migration {
    pub descriptor: ProjectDescriptor,
    /// The rendered `pyproject.toml`.
    pub rendered: String,
    /// Where the descriptor was written; `None` on a dry run.
    pub written: Option<PathBuf>,
    /// Where a previous `pyproject.toml` was moved, if any.
    pub backup: Option<PathBuf>,
}

/// A setuptools package directory to migrate.
#[derive(Debug, Clone)]
pub struct PyProject {
    package_path: Option<PathBuf>,
}

impl PyProject {
    /// Target `package_path`, or the current directory when `None`.
    pub fn new(package_path: Option<PathBuf>) -> Self {
        Self { package_path }
    }

    /// The directory this migration operates on.
    pub fn package_dir(&self) -> Result<PathBuf, MigrateError> {
        match &self.package_path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().map_err(|err| MigrateError::io(".", err)),
        }
    }

    /// Convert the package's `setup.py` (plus `setup.cfg` / `MANIFEST.in`) into `pyproject.toml`.
    pub fn migrate(&self, options: &MigrateOptions) -> Result<Migration, MigrateError> {
        let package_dir = self.package_dir()?;
        migrate_dir(&package_dir, options).inspect_err(|err| {
            debug!("Migration of {} failed: {err:?}", package_dir.display());
        })
    }
}

fn migrate_dir(package_dir: &Path, options: &MigrateOptions) -> Result<Migration, MigrateError> {
    let files = LegacyFiles::discover(package_dir);
    debug!("Discovered {files:?}");

    let Some(setup_py_path) = &files.setup_py else {
        return Err(MigrateError::NotFound {
            path: package_dir.to_path_buf(),
        });
    };

    let source = fs_err::read_to_string(setup_py_path)
        .map_err(|err| MigrateError::io(setup_py_path, err))?;
    let call_args = setup_py::extract(&source, setup_py_path)?;

    let setup_cfg = files
        .setup_cfg
        .as_deref()
        .map(SetupCfg::from_path)
        .transpose()?;
    let manifest = files
        .manifest_in
        .as_deref()
        .map(Manifest::from_path)
        .transpose()?;

    let descriptor = pyproject::merge(
        &call_args,
        setup_cfg.as_ref(),
        manifest.as_ref(),
        MergeOptions {
            require_entry_points: options.require_entry_points,
        },
    )?;

    let target = files.pyproject_target();
    let rendered = descriptor
        .to_toml_string()
        .map_err(|err| MigrateError::Validation {
            path: target.clone(),
            message: err.to_string(),
        })?;

    if options.dry_run {
        info!("Dry run: not writing {}", target.display());
        return Ok(Migration {
            descriptor,
            rendered,
            written: None,
            backup: None,
        });
    }

    let outcome = pyproject::write(&descriptor, &target, files.pyproject_toml.as_deref())?;
    Ok(Migration {
        descriptor,
        rendered,
        written: Some(outcome.path),
        backup: outcome.backup,
    })
}
