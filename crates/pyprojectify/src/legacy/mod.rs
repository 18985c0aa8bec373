//! Readers for the legacy setuptools inputs.
//!
//! - `setup.py`: parsed statically by [`setup_py::extract`] into `setup()` keyword arguments.
//! - `setup.cfg`: read as INI by [`SetupCfg`].
//! - `MANIFEST.in`: read line by line by [`Manifest`].

pub mod discovery;
pub mod manifest;
pub mod setup_cfg;
pub mod setup_py;
pub mod value;

pub use discovery::LegacyFiles;
pub use manifest::Manifest;
pub use setup_cfg::SetupCfg;
pub use setup_py::{CallArguments, SetupCall, extract};
pub use value::LiteralValue;
