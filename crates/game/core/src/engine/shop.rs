use super::Duel;
use crate::action::{ItemKind, PurchaseError};
use crate::events::GameEvent;
use crate::state::Side;

impl Duel {
    /// Buys and immediately uses `item`.
    ///
    /// The AI may only shop on its own turn and the purchase counts as one of
    /// its actions. The player's shop is open at any time and costs no action.
    /// Returns the buyer's health afterwards.
    pub fn buy_item(&mut self, side: Side, item: ItemKind) -> Result<u32, PurchaseError> {
        if side == Side::Ai && !self.turns.casting_enabled(side) {
            return Err(PurchaseError::CastingDisabled);
        }

        let (cost, restore) = match item {
            ItemKind::HealthPotion => (
                self.config.shop.health_potion_cost,
                self.config.shop.health_potion_restore,
            ),
        };

        let ledger = &mut self.combatant_mut(side).ledger;
        let available = ledger.gold();
        if !ledger.spend_gold(cost) {
            return Err(PurchaseError::InsufficientGold {
                required: cost,
                available,
            });
        }
        let health = ledger.adjust_health(i64::from(restore));
        let gold = ledger.gold();

        self.push_event(GameEvent::ItemPurchased {
            side,
            item,
            health,
            gold,
        });
        if side == Side::Ai {
            self.turns.record_action(side);
        }
        Ok(health)
    }

    /// Price of `item` under the current configuration.
    pub fn item_cost(&self, item: ItemKind) -> u32 {
        match item {
            ItemKind::HealthPotion => self.config.shop.health_potion_cost,
        }
    }
}
