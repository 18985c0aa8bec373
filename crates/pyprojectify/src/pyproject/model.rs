//! Data model for the generated `pyproject.toml`.
//!
//! Field order here is the section order in the emitted file:
//! `[build-system]`, `[project]`, `[dependencies]`, `[script]`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The setuptools PEP 517 backend.
pub const BUILD_BACKEND: &str = "setuptools.build_meta";

/// Requirements every generated `[build-system]` starts with.
pub const BASE_BUILD_REQUIRES: [&str; 2] = ["setuptools", "wheel"];

/// The complete generated descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    #[serde(rename = "build-system")]
    pub build_system: BuildSystem,

    /// Allow-listed metadata, in insertion order.
    pub project: toml::Table,

    /// Package name -> version constraint (empty when unconstrained).
    pub dependencies: IndexMap<String, String>,

    /// Console script name -> `module:function`.
    pub script: IndexMap<String, String>,
}

/// The `[build-system]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSystem {
    pub requires: Vec<String>,

    #[serde(rename = "build-backend")]
    pub build_backend: String,
}

impl Default for BuildSystem {
    fn default() -> Self {
        Self {
            requires: BASE_BUILD_REQUIRES.map(ToOwned::to_owned).to_vec(),
            build_backend: BUILD_BACKEND.to_owned(),
        }
    }
}

impl ProjectDescriptor {
    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The value-level view used for round-trip comparison.
    pub fn to_table(&self) -> Result<toml::Table, toml::ser::Error> {
        toml::Table::try_from(self)
    }
}
