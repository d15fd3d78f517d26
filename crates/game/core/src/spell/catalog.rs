use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::{SpellDefinition, SpellId};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

/// Problems detected while building a [`SpellCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    #[error("spell {0} is defined more than once")]
    DuplicateDefinition(SpellId),

    #[error("spell {0} has no definition")]
    MissingDefinition(SpellId),

    #[error("spell {spell} lists prerequisite {prerequisite}, which has no definition")]
    DanglingPrerequisite {
        spell: SpellId,
        prerequisite: SpellId,
    },

    #[error("default action {0} must be marked default_unlocked")]
    DefaultActionNotDefault(SpellId),

    #[error("default action {0} must not declare a resource cost or prerequisites")]
    DefaultActionRestricted(SpellId),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateDefinition(_) => "CATALOG_DUPLICATE_DEFINITION",
            Self::MissingDefinition(_) => "CATALOG_MISSING_DEFINITION",
            Self::DanglingPrerequisite { .. } => "CATALOG_DANGLING_PREREQUISITE",
            Self::DefaultActionNotDefault(_) => "CATALOG_DEFAULT_ACTION_NOT_DEFAULT",
            Self::DefaultActionRestricted(_) => "CATALOG_DEFAULT_ACTION_RESTRICTED",
        }
    }
}

/// Validated, read-only table of spell definitions.
///
/// Built once at startup and shared between both combatants behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellCatalog {
    definitions: BTreeMap<SpellId, SpellDefinition>,
}

impl SpellCatalog {
    /// Validates and indexes `definitions`.
    ///
    /// Checks run in order: duplicates, dangling prerequisites, missing
    /// definitions, then the default action's shape.
    pub fn new(
        definitions: impl IntoIterator<Item = SpellDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut indexed = BTreeMap::new();
        for definition in definitions {
            let id = definition.id;
            if indexed.insert(id, definition).is_some() {
                return Err(CatalogError::DuplicateDefinition(id));
            }
        }

        for definition in indexed.values() {
            if let Some(&prerequisite) = definition
                .prerequisites
                .iter()
                .find(|prerequisite| !indexed.contains_key(prerequisite))
            {
                return Err(CatalogError::DanglingPrerequisite {
                    spell: definition.id,
                    prerequisite,
                });
            }
        }

        if let Some(missing) = SpellId::iter().find(|id| !indexed.contains_key(id)) {
            return Err(CatalogError::MissingDefinition(missing));
        }

        let default_id = GameConfig::DEFAULT_ACTION;
        let default = indexed
            .get(&default_id)
            .ok_or(CatalogError::MissingDefinition(default_id))?;
        if !default.default_unlocked {
            return Err(CatalogError::DefaultActionNotDefault(default_id));
        }
        if default.declares_cost() || !default.prerequisites.is_empty() {
            return Err(CatalogError::DefaultActionRestricted(default_id));
        }

        Ok(Self {
            definitions: indexed,
        })
    }

    pub fn lookup(&self, id: SpellId) -> Option<&SpellDefinition> {
        self.definitions.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spell::fixtures::stock_definitions;

    #[test]
    fn accepts_stock_table() {
        let catalog = SpellCatalog::new(stock_definitions()).unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.lookup(SpellId::BasicAttack).unwrap().default_unlocked);
        assert!(!catalog.lookup(SpellId::Fireball).unwrap().default_unlocked);
    }

    #[test]
    fn rejects_duplicate_definition() {
        let mut definitions = stock_definitions();
        definitions.push(definitions[1].clone());
        assert_eq!(
            SpellCatalog::new(definitions),
            Err(CatalogError::DuplicateDefinition(SpellId::Fireball))
        );
    }

    #[test]
    fn rejects_dangling_prerequisite() {
        let definitions: Vec<_> = stock_definitions()
            .into_iter()
            .filter(|def| def.id != SpellId::Fireball)
            .collect();
        assert_eq!(
            SpellCatalog::new(definitions),
            Err(CatalogError::DanglingPrerequisite {
                spell: SpellId::Eruption,
                prerequisite: SpellId::Fireball,
            })
        );
    }

    #[test]
    fn rejects_missing_definition() {
        let definitions: Vec<_> = stock_definitions()
            .into_iter()
            .filter(|def| def.id != SpellId::BasicAttack)
            .collect();
        assert_eq!(
            SpellCatalog::new(definitions),
            Err(CatalogError::MissingDefinition(SpellId::BasicAttack))
        );
    }

    #[test]
    fn rejects_default_action_with_cost() {
        let mut definitions = stock_definitions();
        definitions[0].base_resource_cost = 5;
        let err = SpellCatalog::new(definitions).unwrap_err();
        assert_eq!(err, CatalogError::DefaultActionRestricted(SpellId::BasicAttack));
        assert_eq!(err.severity(), ErrorSeverity::Configuration);
    }

    #[test]
    fn rejects_default_action_not_flagged() {
        let mut definitions = stock_definitions();
        definitions[0].default_unlocked = false;
        assert_eq!(
            SpellCatalog::new(definitions),
            Err(CatalogError::DefaultActionNotDefault(SpellId::BasicAttack))
        );
    }
}
