//! Bridge from legacy setuptools metadata to a [`ProjectDescriptor`].
//!
//! The central function [`merge`] maps:
//!
//! - `setup_requires` -> `[build-system] requires`
//! - allow-listed `setup()` keywords, then `setup.cfg` keys -> `[project]`
//! - `install_requires` + `extras_require` -> `[dependencies]`
//! - `entry_points["console_scripts"]` -> `[script]`
//! - `MANIFEST.in` include/exclude lines -> `project.include` / `project.exclude`

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::MigrateError;
use crate::legacy::{CallArguments, LiteralValue, Manifest, SetupCfg};
use crate::pyproject::model::{BuildSystem, ProjectDescriptor};

/// Metadata fields copied into `[project]`.
pub const PROJECT_FIELDS: [&str; 12] = [
    "name",
    "version",
    "author",
    "author_email",
    "maintainer",
    "maintainer_email",
    "url",
    "license",
    "description",
    "long_description",
    "keywords",
    "classifiers",
];

/// Characters that end the package name in a requirement string.
///
/// `;` starts an environment marker, which is kept in the constraint.
const CONSTRAINT_OPERATORS: [char; 7] = ['<', '>', '=', '!', '~', ' ', ';'];

/// Knobs for [`merge`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Fail with [`MigrateError::MissingEntryPoints`] when no console scripts are declared.
    pub require_entry_points: bool,
}

/// Merge the `setup()` arguments with the optional `setup.cfg` and `MANIFEST.in`.
pub fn merge(
    call_args: &CallArguments,
    setup_cfg: Option<&SetupCfg>,
    manifest: Option<&Manifest>,
    options: MergeOptions,
) -> Result<ProjectDescriptor, MigrateError> {
    let build_system = build_system(call_args);
    let mut project = project_metadata(call_args);
    let mut dependencies = dependencies(call_args);

    let mut script = IndexMap::new();
    let mut has_entry_points = false;
    if let Some(entries) = console_scripts(call_args) {
        has_entry_points = true;
        insert_scripts(&mut script, entries.iter().map(String::as_str));
    }

    if let Some(setup_cfg) = setup_cfg {
        for field in PROJECT_FIELDS {
            if let Some(value) = setup_cfg.get(field) {
                debug!("setup.cfg overrides `{field}`");
                project.insert(field.to_owned(), SetupCfg::value_to_toml(value));
            }
        }
        for requirement in setup_cfg.install_requires() {
            insert_dependency(&mut dependencies, requirement);
        }
        if let Some(entries) = setup_cfg.console_scripts() {
            has_entry_points = true;
            insert_scripts(&mut script, entries);
        }
    }

    if !has_entry_points {
        if options.require_entry_points {
            return Err(MigrateError::MissingEntryPoints);
        }
        warn!("No console scripts declared; `[script]` will be empty");
    }

    if let Some(manifest) = manifest {
        project.insert("packages".to_owned(), toml::Value::Array(Vec::new()));
        project.insert("include".to_owned(), string_array(manifest.includes()));
        project.insert("exclude".to_owned(), string_array(manifest.excludes()));
    }

    Ok(ProjectDescriptor {
        build_system,
        project,
        dependencies,
        script,
    })
}

/// Split a requirement into its package name and version constraint.
///
/// The name ends at the first comparison operator, space or `;`; the remainder,
/// trimmed, is the constraint (empty when unconstrained).
pub fn split_requirement(requirement: &str) -> (&str, &str) {
    let requirement = requirement.trim();
    match requirement.find(CONSTRAINT_OPERATORS) {
        Some(index) => (&requirement[..index], requirement[index..].trim()),
        None => (requirement, ""),
    }
}

/// Split a `name = module:function` entry point at its first `=`.
pub fn split_entry_point(entry: &str) -> Option<(&str, &str)> {
    entry
        .split_once('=')
        .map(|(name, target)| (name.trim(), target.trim()))
}

fn build_system(call_args: &CallArguments) -> BuildSystem {
    let mut build_system = BuildSystem::default();
    if let Some(value) = call_args.get("setup_requires") {
        for requirement in string_items(value, "setup_requires") {
            if !build_system.requires.contains(&requirement) {
                build_system.requires.push(requirement);
            }
        }
    }
    build_system
}

fn project_metadata(call_args: &CallArguments) -> toml::Table {
    call_args
        .iter()
        .filter(|(key, _)| PROJECT_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.to_toml()))
        .collect()
}

fn dependencies(call_args: &CallArguments) -> IndexMap<String, String> {
    let mut requirements = call_args
        .get("install_requires")
        .map(|value| string_items(value, "install_requires"))
        .unwrap_or_default();

    match call_args.get("extras_require") {
        Some(LiteralValue::Dict(extras)) => {
            for (extra, value) in extras {
                requirements.extend(string_items(value, &format!("extras_require[{extra}]")));
            }
        }
        Some(other) if !other.is_null() => {
            warn!("Ignoring `extras_require`: expected a dict, found `{other}`");
        }
        _ => {}
    }

    let mut dependencies = IndexMap::new();
    for requirement in &requirements {
        insert_dependency(&mut dependencies, requirement);
    }
    dependencies
}

fn insert_dependency(dependencies: &mut IndexMap<String, String>, requirement: &str) {
    let (name, constraint) = split_requirement(requirement);
    if name.is_empty() {
        return;
    }
    dependencies.insert(name.to_owned(), constraint.to_owned());
}

/// Look up `entry_points["console_scripts"]`, if declared.
fn console_scripts(call_args: &CallArguments) -> Option<Vec<String>> {
    let scripts = call_args.get("entry_points")?.get("console_scripts")?;
    Some(string_items(scripts, "console_scripts"))
}

fn insert_scripts<'a>(
    script: &mut IndexMap<String, String>,
    entries: impl IntoIterator<Item = &'a str>,
) {
    for entry in entries {
        match split_entry_point(entry) {
            Some((name, target)) => {
                script.insert(name.to_owned(), target.to_owned());
            }
            None => warn!("Skipping malformed console script `{entry}`"),
        }
    }
}

/// Flatten a list (or newline-separated string) of strings.
fn string_items(value: &LiteralValue, field: &str) -> Vec<String> {
    match value {
        LiteralValue::Str(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        LiteralValue::List(items) => items
            .iter()
            .filter_map(|item| match item.as_str() {
                Some(text) => Some(text.to_owned()),
                None => {
                    warn!("Skipping non-string entry `{item}` in `{field}`");
                    None
                }
            })
            .collect(),
        value if value.is_null() => Vec::new(),
        other => {
            warn!("Ignoring `{field}`: expected a list of strings, found `{other}`");
            Vec::new()
        }
    }
}

fn string_array(items: Vec<&str>) -> toml::Value {
    toml::Value::Array(
        items
            .into_iter()
            .map(|item| toml::Value::String(item.to_owned()))
            .collect(),
    )
}
