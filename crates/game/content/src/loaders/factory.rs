//! Content factory for building match content from data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use game_core::{GameConfig, NpcTemplates, SpellCatalog};

use crate::loaders::{ConfigLoader, LoadResult, NpcLoader, SpellLoader};

const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");
const EMBEDDED_SPELLS: &str = include_str!("../../data/spells.ron");
const EMBEDDED_NPCS: &str = include_str!("../../data/npcs.ron");

/// Everything a match needs from content, validated and ready to inject.
#[derive(Clone, Debug)]
pub struct GameContent {
    pub config: GameConfig,
    pub catalog: Arc<SpellCatalog>,
    pub npcs: NpcTemplates,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── spells.ron
/// └── npcs.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Builds content from the copies of the stock data compiled into this crate.
    pub fn embedded() -> LoadResult<GameContent> {
        Ok(GameContent {
            config: ConfigLoader::parse(EMBEDDED_CONFIG)?,
            catalog: Arc::new(SpellLoader::parse(EMBEDDED_SPELLS)?),
            npcs: NpcLoader::parse(EMBEDDED_NPCS)?,
        })
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load and validate the spell catalog from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellCatalog> {
        SpellLoader::load(&self.data_dir.join("spells.ron"))
    }

    /// Load NPC templates from `npcs.ron`.
    pub fn load_npcs(&self) -> LoadResult<NpcTemplates> {
        NpcLoader::load(&self.data_dir.join("npcs.ron"))
    }

    /// Load every content file in the data directory.
    pub fn load(&self) -> LoadResult<GameContent> {
        Ok(GameContent {
            config: self.load_config()?,
            catalog: Arc::new(self.load_spells()?),
            npcs: self.load_npcs()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn embedded_content_is_valid() {
        let content = ContentFactory::embedded().unwrap();
        assert_eq!(content.catalog.len(), 5);
        assert_eq!(content.npcs.mini_boss.level, 3);
        assert_eq!(content.config.turns.actions_per_turn, 2);
    }

    #[test]
    fn loads_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[shop]\nhealth_potion_cost = 75\n")
            .unwrap();
        std::fs::write(dir.path().join("spells.ron"), EMBEDDED_SPELLS).unwrap();
        std::fs::write(dir.path().join("npcs.ron"), EMBEDDED_NPCS).unwrap();

        let content = ContentFactory::new(dir.path()).load().unwrap();

        assert_eq!(content.config.shop.health_potion_cost, 75);
        assert_eq!(content.catalog.len(), 5);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_npcs().unwrap_err();
        assert!(err.to_string().contains("npcs.ron"));
    }
}
