//! Per-combatant progression: XP, levels, gold, skill points and skill levels.
//!
//! [`ProgressionLedger`] owns the numbers; the unlock helpers validate and
//! apply skill purchases against a [`SpellCatalog`](crate::spell::SpellCatalog).

mod error;
mod ledger;
mod unlock;

pub use error::UnlockError;
pub use ledger::{LevelUpReason, ProgressionLedger, ProgressionNotice};
pub use unlock::{
    SkillUnlock, prerequisites_met, try_unlock_or_upgrade, unlock_candidates, upgrade_candidates,
};
