//! `pyprojectify [PATH]`: migrate one package directory.

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::commands::ExitStatus;
use crate::error::MigrateError;
use crate::migrate::PyProject;
use crate::printer::Printer;

/// Execute the migration described by the parsed CLI.
pub fn execute(cli: &Cli, printer: Printer) -> Result<ExitStatus> {
    let project = PyProject::new(cli.path.clone());
    let package_dir = project.package_dir()?;

    let migration = match project.migrate(&cli.migrate_options()) {
        Ok(migration) => migration,
        Err(MigrateError::MissingEntryPoints) => {
            printer.error(&MigrateError::MissingEntryPoints.to_string());
            printer.info("Remove `--strict` to migrate a package without console scripts.");
            return Ok(ExitStatus::Failure);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to migrate {}", package_dir.display()));
        }
    };

    let Some(written) = &migration.written else {
        printer.document(&migration.rendered);
        return Ok(ExitStatus::Success);
    };

    if let Some(backup) = &migration.backup {
        printer.warn(&format!(
            "Moved the existing pyproject.toml to {}",
            backup.display()
        ));
    }
    if migration.descriptor.script.is_empty() {
        printer.warn("No console scripts found; `[script]` is empty.");
    }
    printer.success("Migrated", &written.display().to_string());
    printer.info(&format!(
        "{}, {}",
        counted(migration.descriptor.dependencies.len(), "dependency", "dependencies"),
        counted(migration.descriptor.script.len(), "console script", "console scripts")
    ));

    Ok(ExitStatus::Success)
}

/// Format `count` with the singular or plural noun.
fn counted(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
