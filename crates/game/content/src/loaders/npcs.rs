//! NPC template loader.

use std::path::Path;

use game_core::NpcTemplates;

use crate::loaders::{LoadResult, read_file};

/// Loader for mob and mini-boss templates from RON files.
pub struct NpcLoader;

impl NpcLoader {
    /// Load NPC templates from a RON file.
    pub fn load(path: &Path) -> LoadResult<NpcTemplates> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<NpcTemplates> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse NPC templates RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_templates_match_builtin_defaults() {
        let templates = NpcLoader::parse(include_str!("../../data/npcs.ron")).unwrap();
        assert_eq!(templates, NpcTemplates::default());
    }

    #[test]
    fn missing_field_is_reported() {
        let err = NpcLoader::parse("NpcTemplates(mob: (health: 1))").unwrap_err();
        assert!(err.to_string().contains("NPC templates"));
    }
}
