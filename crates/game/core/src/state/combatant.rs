use std::collections::BTreeMap;

use super::Position;
use crate::action::{PendingCast, Target};
use crate::config::GameConfig;
use crate::progression::ProgressionLedger;
use crate::spell::{SpellCatalog, SpellDefinition, SpellId};

/// Which combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

/// Current stats of one castable action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionEntry {
    pub spell: SpellId,
    pub level: u32,
    pub damage: u32,
    pub cost: u32,
}

impl ActionEntry {
    fn from_definition(definition: &SpellDefinition, level: u32) -> Self {
        Self {
            spell: definition.id,
            level,
            damage: definition.damage_at_level(level),
            cost: definition.cost_at_level(level),
        }
    }
}

/// Default actions plus every unlocked skill, derived from the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionTable {
    entries: BTreeMap<SpellId, ActionEntry>,
}

impl ActionTable {
    pub fn get(&self, spell: SpellId) -> Option<&ActionEntry> {
        self.entries.get(&spell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One side of the duel.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub side: Side,
    pub ledger: ProgressionLedger,
    pub position: Position,
    actions: ActionTable,
    selected_target: Option<Target>,
    pub(crate) pending: Option<PendingCast>,
}

impl Combatant {
    /// Builds a combatant; `default_unlocked` spells are stored at level 1.
    pub fn new(
        side: Side,
        mut ledger: ProgressionLedger,
        position: Position,
        catalog: &SpellCatalog,
    ) -> Self {
        ledger.grant_default_skills(catalog);
        let mut combatant = Self {
            side,
            ledger,
            position,
            actions: ActionTable::default(),
            selected_target: None,
            pending: None,
        };
        combatant.rebuild_actions(catalog);
        combatant
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// Effective level of `spell`: 1 for the default action, the stored level
    /// otherwise (0 when locked).
    pub fn spell_level(&self, spell: SpellId) -> u32 {
        if spell == GameConfig::DEFAULT_ACTION {
            1
        } else {
            self.ledger.skill_level(spell)
        }
    }

    /// Re-derives the table entry for `spell` after an unlock or upgrade.
    pub fn refresh_action(&mut self, catalog: &SpellCatalog, spell: SpellId) {
        let level = self.spell_level(spell);
        match catalog.lookup(spell) {
            Some(definition) if level > 0 => {
                self.actions
                    .entries
                    .insert(spell, ActionEntry::from_definition(definition, level));
            }
            _ => {
                self.actions.entries.remove(&spell);
            }
        }
    }

    pub fn rebuild_actions(&mut self, catalog: &SpellCatalog) {
        self.actions.entries.clear();
        let spells: Vec<SpellId> = catalog.iter().map(|def| def.id).collect();
        for spell in spells {
            self.refresh_action(catalog, spell);
        }
    }

    pub fn selected_target(&self) -> Option<Target> {
        self.selected_target
    }

    pub fn select_target(&mut self, target: Option<Target>) {
        self.selected_target = target;
    }

    pub fn pending_cast(&self) -> Option<&PendingCast> {
        self.pending.as_ref()
    }

    pub fn is_defeated(&self) -> bool {
        self.ledger.is_defeated()
    }
}
