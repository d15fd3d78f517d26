//! Content loaders for reading game data from files.
//!
//! Each loader has a `load(path)` entry point for files on disk and a
//! `parse(text)` entry point used for the embedded copies.

pub mod config;
pub mod factory;
pub mod npcs;
pub mod spells;

pub use config::ConfigLoader;
pub use factory::{ContentFactory, GameContent};
pub use npcs::NpcLoader;
pub use spells::SpellLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
