//! Stock AI policy.

use game_core::{Duel, ItemKind, Side, SpellId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::skills::{best_affordable_spell, pick_skill};
use super::targeting::choose_target;
use crate::api::{AiDecision, AiPolicy};

/// Coin-flip between attacking and shopping, with weighted target draws.
///
/// Seed it for reproducible matches; [`from_entropy`](Self::from_entropy)
/// otherwise.
#[derive(Debug, Clone)]
pub struct WeightedRandomPolicy {
    rng: ChaCha8Rng,
}

impl WeightedRandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    fn attack(&mut self, duel: &Duel) -> AiDecision {
        let target = choose_target(duel, &mut self.rng);
        let spell = best_affordable_spell(duel);
        AiDecision::Cast { spell, target }
    }
}

impl Default for WeightedRandomPolicy {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl AiPolicy for WeightedRandomPolicy {
    fn decide(&mut self, duel: &Duel) -> AiDecision {
        if self.rng.gen_bool(0.5) {
            let item = ItemKind::HealthPotion;
            let gold = duel.combatant(Side::Ai).ledger.gold();
            if gold >= duel.item_cost(item) {
                return AiDecision::BuyItem(item);
            }
            tracing::debug!(gold, %item, "AI cannot afford item, attacking instead");
        }
        self.attack(duel)
    }

    fn next_skill(&mut self, duel: &Duel) -> Option<SpellId> {
        pick_skill(duel, &mut self.rng)
    }
}
