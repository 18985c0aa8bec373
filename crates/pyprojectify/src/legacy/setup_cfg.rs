//! `setup.cfg` reader.
//!
//! The INI sections are flattened into a single `key -> value` map for
//! metadata lookups. Keys from `[metadata]` take precedence over keys of the
//! same name in other sections. Sections are also kept for the few lookups
//! that need them, such as `[options.entry_points]`.
//!
//! Option names are lowercased. Only whole lines starting with `;` or `#`
//! are comments, so values may contain either character (URL fragments,
//! environment markers).

use std::collections::HashMap;
use std::path::Path;

use configparser::ini::{Ini, IniDefault};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::MigrateError;

const METADATA_SECTION: &str = "metadata";
const ENTRY_POINTS_SECTION: &str = "options.entry_points";

type Sections = HashMap<String, HashMap<String, Option<String>>>;

/// Parsed contents of a `setup.cfg`.
#[derive(Debug, Default, Clone)]
pub struct SetupCfg {
    flat: IndexMap<String, String>,
    sections: Sections,
}

impl SetupCfg {
    /// Read and parse a `setup.cfg` from disk.
    pub fn from_path(path: &Path) -> Result<Self, MigrateError> {
        let content = fs_err::read_to_string(path).map_err(|err| MigrateError::io(path, err))?;
        Self::parse(&content, path)
    }

    /// Parse `setup.cfg` text; `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self, MigrateError> {
        let mut defaults = IniDefault::default();
        defaults.case_sensitive = false;
        defaults.multiline = true;
        defaults.enable_inline_comments = false;
        let mut ini = Ini::new_from_defaults(defaults);
        let sections = ini
            .read(content.to_owned())
            .map_err(|message| MigrateError::Config {
                path: path.to_path_buf(),
                message,
            })?;

        // Non-metadata sections first (in a stable order), then metadata on top.
        let mut names: Vec<&String> = sections
            .keys()
            .filter(|name| name.as_str() != METADATA_SECTION)
            .collect();
        names.sort();
        names.extend(sections.keys().filter(|name| name.as_str() == METADATA_SECTION));

        let mut flat = IndexMap::new();
        for name in names {
            let mut keys: Vec<(&String, &Option<String>)> = sections[name].iter().collect();
            keys.sort_by(|a, b| a.0.cmp(b.0));
            for (key, value) in keys {
                flat.insert(key.clone(), value.clone().unwrap_or_default());
            }
        }

        debug!("Read {} keys from {}", flat.len(), path.display());
        Ok(Self { flat, sections })
    }

    /// Look up a key across all sections, `[metadata]` first.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.flat.get(key).map(String::as_str)
    }

    /// Look up a key in one specific section.
    pub fn get_in(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .and_then(Option::as_deref)
    }

    /// The `console_scripts` declared under `[options.entry_points]`.
    pub fn console_scripts(&self) -> Option<Vec<&str>> {
        self.get_in(ENTRY_POINTS_SECTION, "console_scripts")
            .map(non_empty_lines)
    }

    /// The `install_requires` lines from `[options]`.
    pub fn install_requires(&self) -> Vec<&str> {
        self.get_in("options", "install_requires")
            .map(non_empty_lines)
            .unwrap_or_default()
    }

    /// Convert a value to TOML: values with several non-empty lines become
    /// lists of those lines, anything else stays a string.
    pub fn value_to_toml(value: &str) -> toml::Value {
        match non_empty_lines(value).as_slice() {
            [] => toml::Value::String(String::new()),
            [line] => toml::Value::String((*line).to_owned()),
            lines => toml::Value::Array(
                lines
                    .iter()
                    .map(|line| toml::Value::String((*line).to_owned()))
                    .collect(),
            ),
        }
    }
}

fn non_empty_lines(value: &str) -> Vec<&str> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
