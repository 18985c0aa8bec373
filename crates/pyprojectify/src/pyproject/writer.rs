//! Writer for the generated `pyproject.toml`.
//!
//! An existing file, as found during discovery, is moved to `<target>.bak` first. The new content is
//! written to a temporary file in the same directory and persisted over the
//! target, then read back and compared value-by-value with what was
//! serialized.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::MigrateError;
use crate::pyproject::model::ProjectDescriptor;

/// Turns a descriptor into document text.
pub trait Emitter {
    fn emit(&self, descriptor: &ProjectDescriptor) -> Result<String, String>;
}

/// The default emitter: pretty-printed TOML with insertion order preserved.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlEmitter;

impl Emitter for TomlEmitter {
    fn emit(&self, descriptor: &ProjectDescriptor) -> Result<String, String> {
        descriptor.to_toml_string().map_err(|err| err.to_string())
    }
}

/// What [`write`] did on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    /// Where the previous file was moved, if there was one.
    pub backup: Option<PathBuf>,
}

/// Write `descriptor` to `target` with the default [`TomlEmitter`].
///
/// `existing` is the file currently at `target`, if any; it is backed up
/// before being replaced.
pub fn write(
    descriptor: &ProjectDescriptor,
    target: &Path,
    existing: Option<&Path>,
) -> Result<WriteOutcome, MigrateError> {
    write_with(descriptor, target, existing, &TomlEmitter)
}

/// Write `descriptor` to `target` using `emitter`, then verify the result.
pub fn write_with(
    descriptor: &ProjectDescriptor,
    target: &Path,
    existing: Option<&Path>,
    emitter: &dyn Emitter,
) -> Result<WriteOutcome, MigrateError> {
    let expected = descriptor
        .to_table()
        .map_err(|err| validation_error(target, err.to_string()))?;
    let content = emitter
        .emit(descriptor)
        .map_err(|message| validation_error(target, message))?;

    let backup = existing.map(backup_existing).transpose()?;

    persist_atomically(target, &content)?;
    info!("Wrote {}", target.display());

    verify(target, &expected)?;

    Ok(WriteOutcome {
        path: target.to_path_buf(),
        backup,
    })
}

/// The path an existing file is moved to before being replaced.
pub fn backup_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

fn backup_existing(existing: &Path) -> Result<PathBuf, MigrateError> {
    let backup = backup_path(existing);
    if backup.is_file() {
        debug!("Removing stale backup {}", backup.display());
        fs_err::remove_file(&backup).map_err(|err| MigrateError::io(&backup, err))?;
    }
    fs_err::rename(existing, &backup).map_err(|err| MigrateError::io(existing, err))?;
    info!("Backed up {} to {}", existing.display(), backup.display());
    Ok(backup)
}

fn persist_atomically(target: &Path, content: &str) -> Result<(), MigrateError> {
    let dir = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut file = NamedTempFile::new_in(dir).map_err(|err| MigrateError::io(dir, err))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|err| MigrateError::io(file.path(), err))?;
    file.persist(target)
        .map_err(|err| MigrateError::io(target, err.error))?;
    Ok(())
}

fn verify(target: &Path, expected: &toml::Table) -> Result<(), MigrateError> {
    let written = fs_err::read_to_string(target).map_err(|err| MigrateError::io(target, err))?;
    let reparsed: toml::Table = toml::from_str(&written)
        .map_err(|err| validation_error(target, format!("not valid TOML: {err}")))?;

    if &reparsed != expected {
        return Err(validation_error(
            target,
            "re-parsed content differs from the generated descriptor".to_owned(),
        ));
    }
    debug!("Validated {}", target.display());
    Ok(())
}

fn validation_error(target: &Path, message: String) -> MigrateError {
    MigrateError::Validation {
        path: target.to_path_buf(),
        message,
    }
}
