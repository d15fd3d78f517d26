use super::{ProgressionLedger, ProgressionNotice, UnlockError};
use crate::config::GameConfig;
use crate::spell::{SpellCatalog, SpellDefinition, SpellId};

/// Result of a successful unlock or upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillUnlock {
    pub spell: SpellId,
    /// Level after the purchase (1 for a fresh unlock).
    pub level: u32,
    pub notice: ProgressionNotice,
}

/// Spends `point_cost` skill points to raise `spell` by one level.
///
/// Validation order: default action, catalog lookup, prerequisites (only for
/// locked spells), skill points. Every check runs before the ledger is
/// touched, so nothing is mutated on error.
pub fn try_unlock_or_upgrade(
    ledger: &mut ProgressionLedger,
    catalog: &SpellCatalog,
    spell: SpellId,
    point_cost: u32,
) -> Result<SkillUnlock, UnlockError> {
    if spell == GameConfig::DEFAULT_ACTION {
        return Err(UnlockError::DefaultSkillProtected);
    }
    let definition = catalog.lookup(spell).ok_or(UnlockError::UnknownAction)?;

    let current = ledger.skill_level(spell);
    if current == 0 && !prerequisites_met(ledger, definition) {
        return Err(UnlockError::PrerequisiteNotMet);
    }

    let notice = ledger.spend_skill_points(point_cost)?;
    let level = current + 1;
    ledger.set_skill_level(spell, level);

    Ok(SkillUnlock {
        spell,
        level,
        notice,
    })
}

/// OR semantics: any listed prerequisite at level > 0. An empty list passes.
pub fn prerequisites_met(ledger: &ProgressionLedger, definition: &SpellDefinition) -> bool {
    definition.prerequisites.is_empty()
        || definition
            .prerequisites
            .iter()
            .any(|&prerequisite| ledger.is_unlocked(prerequisite))
}

/// Locked spells other than the default action whose prerequisites are met.
pub fn unlock_candidates(ledger: &ProgressionLedger, catalog: &SpellCatalog) -> Vec<SpellId> {
    catalog
        .iter()
        .filter(|def| def.id != GameConfig::DEFAULT_ACTION)
        .filter(|def| !ledger.is_unlocked(def.id))
        .filter(|def| prerequisites_met(ledger, def))
        .map(|def| def.id)
        .collect()
}

/// Unlocked spells other than the default action.
pub fn upgrade_candidates(ledger: &ProgressionLedger, catalog: &SpellCatalog) -> Vec<SpellId> {
    catalog
        .iter()
        .filter(|def| def.id != GameConfig::DEFAULT_ACTION)
        .filter(|def| ledger.is_unlocked(def.id))
        .map(|def| def.id)
        .collect()
}
