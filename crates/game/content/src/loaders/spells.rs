//! Spell table loader.

use std::path::Path;

use game_core::{SpellCatalog, SpellDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Spell table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellTable {
    pub spells: Vec<SpellDefinition>,
}

/// Loader for the spell catalog from RON files.
pub struct SpellLoader;

impl SpellLoader {
    /// Load and validate a spell catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a SpellTable
    pub fn load(path: &Path) -> LoadResult<SpellCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a spell catalog from RON text.
    ///
    /// Fails on malformed RON and on any catalog validation error
    /// (duplicates, missing spells, dangling prerequisites).
    pub fn parse(content: &str) -> LoadResult<SpellCatalog> {
        let table: SpellTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell table RON: {}", e))?;

        SpellCatalog::new(table.spells)
            .map_err(|e| anyhow::anyhow!("Invalid spell table: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::SpellId;

    const STOCK: &str = include_str!("../../data/spells.ron");

    #[test]
    fn stock_table_loads() {
        let catalog = SpellLoader::parse(STOCK).unwrap();

        assert_eq!(catalog.len(), 5);
        let eruption = catalog.lookup(SpellId::Eruption).unwrap();
        assert_eq!(eruption.base_damage, 60);
        assert_eq!(
            eruption.prerequisites,
            vec![SpellId::Fireball, SpellId::Cryoblast]
        );
        assert!(catalog.lookup(SpellId::BasicAttack).unwrap().default_unlocked);
        assert!(catalog.lookup(SpellId::Fireball).unwrap().prerequisites.is_empty());
    }

    #[test]
    fn dangling_prerequisite_is_reported() {
        let ron = r#"SpellTable(spells: [
            (id: BasicAttack, base_damage: 10, base_resource_cost: 0,
             damage_per_level: 0, resource_per_level: 0, default_unlocked: true),
            (id: Eruption, base_damage: 60, base_resource_cost: 65,
             damage_per_level: 15, resource_per_level: 6, prerequisites: [Fireball]),
        ])"#;

        let err = SpellLoader::parse(ron).unwrap_err();
        assert!(err.to_string().contains("Invalid spell table"));
        assert!(err.to_string().contains("Fireball"));
    }

    #[test]
    fn malformed_ron_is_reported() {
        let err = SpellLoader::parse("SpellTable(spells: [").unwrap_err();
        assert!(err.to_string().contains("Failed to parse spell table RON"));
    }
}
