//! The generated `pyproject.toml`: its data model, how it is assembled from
//! legacy metadata, and how it is written to disk.

pub mod bridge;
pub mod model;
pub mod writer;

pub use bridge::{MergeOptions, merge};
pub use model::{BuildSystem, ProjectDescriptor};
pub use writer::{Emitter, TomlEmitter, WriteOutcome, write, write_with};
