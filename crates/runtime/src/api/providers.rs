//! Abstraction for sourcing AI intent.
//!
//! Runtime users plug in [`AiPolicy`] implementations so the simulation can
//! run with the stock weighted-random opponent, scripted fixtures, or
//! smarter policies.
use game_core::{Duel, ItemKind, SpellId, Target};

/// One AI action, before validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiDecision {
    Cast { spell: SpellId, target: Target },
    BuyItem(ItemKind),
}

/// Trait for deciding the AI combatant's moves.
///
/// Called from inside the simulation worker, one decision at a time, with a
/// read-only view of the match.
pub trait AiPolicy: Send {
    /// Picks the next action when one is due.
    fn decide(&mut self, duel: &Duel) -> AiDecision;

    /// Picks the next skill to unlock or upgrade, or `None` to stop spending.
    ///
    /// Called repeatedly while the AI has skill points: at the start of its
    /// turn and after each of its level-ups.
    fn next_skill(&mut self, duel: &Duel) -> Option<SpellId>;
}
