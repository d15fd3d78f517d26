//! Spell and skill choices for the AI.

use game_core::{Duel, GameConfig, Side, SpellId, unlock_candidates, upgrade_candidates};
use rand::Rng;
use rand::seq::SliceRandom;

/// Most damaging action the AI can pay for right now, or the default action.
pub fn best_affordable_spell(duel: &Duel) -> SpellId {
    let ai = duel.combatant(Side::Ai);
    let resource = ai.ledger.resource();

    ai.actions()
        .iter()
        .filter(|entry| entry.cost <= resource)
        .max_by_key(|entry| entry.damage)
        .map_or(GameConfig::DEFAULT_ACTION, |entry| entry.spell)
}

/// Next skill to buy: a random new unlock, otherwise a random upgrade.
///
/// `None` when the AI has no points or nothing qualifies.
pub fn pick_skill<R: Rng + ?Sized>(duel: &Duel, rng: &mut R) -> Option<SpellId> {
    let ledger = &duel.combatant(Side::Ai).ledger;
    if ledger.skill_points() == 0 {
        return None;
    }

    let unlocks = unlock_candidates(ledger, duel.catalog());
    if let Some(spell) = unlocks.choose(rng) {
        return Some(*spell);
    }
    upgrade_candidates(ledger, duel.catalog()).choose(rng).copied()
}
