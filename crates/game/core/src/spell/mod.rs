//! Spell identifiers, definitions and per-level scaling.
//!
//! Every castable action (including the free basic attack) is a spell. The
//! set of spells is closed: [`SpellId`] enumerates them and the
//! [`SpellCatalog`] must define each one exactly once.

mod catalog;

pub use catalog::{CatalogError, SpellCatalog};

/// Identifier of a castable action.
///
/// Display names match the in-game labels (`"Ice Bolt"` has a space).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellId {
    BasicAttack,
    Fireball,
    #[strum(to_string = "Ice Bolt", serialize = "IceBolt")]
    IceBolt,
    Cryoblast,
    Eruption,
}

impl SpellId {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Immutable description of a spell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    pub base_damage: u32,
    pub base_resource_cost: u32,
    pub damage_per_level: u32,
    pub resource_per_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_unlocked: bool,
    /// Any one of these at level > 0 unlocks eligibility. Empty means none.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisites: Vec<SpellId>,
}

impl SpellDefinition {
    /// `base_damage + (level - 1) * damage_per_level`.
    ///
    /// Level 0 is treated as level 1.
    pub fn damage_at_level(&self, level: u32) -> u32 {
        self.base_damage
            .saturating_add(level.saturating_sub(1).saturating_mul(self.damage_per_level))
    }

    /// `base_resource_cost + (level - 1) * resource_per_level`.
    ///
    /// Level 0 is treated as level 1.
    pub fn cost_at_level(&self, level: u32) -> u32 {
        self.base_resource_cost.saturating_add(
            level
                .saturating_sub(1)
                .saturating_mul(self.resource_per_level),
        )
    }

    pub(crate) fn declares_cost(&self) -> bool {
        self.base_resource_cost > 0 || self.resource_per_level > 0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    fn def(
        id: SpellId,
        base_damage: u32,
        base_resource_cost: u32,
        damage_per_level: u32,
        resource_per_level: u32,
        prerequisites: &[SpellId],
    ) -> SpellDefinition {
        SpellDefinition {
            id,
            base_damage,
            base_resource_cost,
            damage_per_level,
            resource_per_level,
            default_unlocked: id == SpellId::BasicAttack,
            prerequisites: prerequisites.to_vec(),
        }
    }

    /// The stock spell table shipped in `spells.ron`.
    pub(crate) fn stock_definitions() -> Vec<SpellDefinition> {
        use SpellId::*;
        vec![
            def(BasicAttack, 10, 0, 0, 0, &[]),
            def(Fireball, 30, 40, 10, 5, &[]),
            def(IceBolt, 25, 30, 8, 4, &[]),
            def(Cryoblast, 45, 50, 12, 5, &[IceBolt, Eruption]),
            def(Eruption, 60, 65, 15, 6, &[Fireball, Cryoblast]),
        ]
    }

    pub(crate) fn stock_catalog() -> SpellCatalog {
        SpellCatalog::new(stock_definitions()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn scaling_is_non_decreasing_in_level() {
        for def in fixtures::stock_definitions() {
            for level in 1..20 {
                assert!(def.damage_at_level(level + 1) >= def.damage_at_level(level));
                assert!(def.cost_at_level(level + 1) >= def.cost_at_level(level));
            }
        }
    }

    #[test]
    fn level_one_uses_base_values() {
        let catalog = fixtures::stock_catalog();
        let fireball = catalog.lookup(SpellId::Fireball).unwrap();
        assert_eq!(fireball.damage_at_level(1), 30);
        assert_eq!(fireball.cost_at_level(1), 40);
        assert_eq!(fireball.damage_at_level(3), 50);
        assert_eq!(fireball.cost_at_level(3), 50);
    }

    #[test]
    fn display_names_match_labels() {
        assert_eq!(SpellId::IceBolt.to_string(), "Ice Bolt");
        assert_eq!(SpellId::BasicAttack.to_string(), "BasicAttack");
        assert_eq!("Ice Bolt".parse::<SpellId>().unwrap(), SpellId::IceBolt);
        assert_eq!(SpellId::iter().count(), 5);
    }
}
