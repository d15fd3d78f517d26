use std::sync::Arc;

use super::Duel;
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::progression::{ProgressionNotice, SkillUnlock, UnlockError, try_unlock_or_upgrade};
use crate::spell::SpellId;
use crate::state::Side;

impl Duel {
    /// Spends a skill point to unlock or upgrade `spell` for `side`, then
    /// refreshes that side's action table.
    ///
    /// Allowed at any time, including the opponent's turn.
    pub fn unlock_skill(&mut self, side: Side, spell: SpellId) -> Result<SkillUnlock, UnlockError> {
        let catalog = Arc::clone(&self.catalog);
        let combatant = self.combatant_mut(side);
        let unlock = try_unlock_or_upgrade(
            &mut combatant.ledger,
            &catalog,
            spell,
            GameConfig::SKILL_POINT_COST,
        )?;
        combatant.refresh_action(&catalog, spell);

        self.push_event(GameEvent::SkillUnlocked {
            side,
            spell,
            level: unlock.level,
        });
        self.push_notice(side, unlock.notice);
        Ok(unlock)
    }

    pub(crate) fn grant_rewards(&mut self, side: Side, xp: u32, gold: u32) {
        let ledger = &mut self.combatant_mut(side).ledger;
        ledger.gain_gold(gold);
        let notices = ledger.gain_xp(xp);

        self.push_event(GameEvent::RewardsGranted { side, xp, gold });
        for notice in notices {
            self.push_notice(side, notice);
        }
    }

    fn push_notice(&mut self, side: Side, notice: ProgressionNotice) {
        self.push_event(GameEvent::LevelUp {
            side,
            level: notice.level,
            skill_points: notice.skill_points,
            reason: notice.reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::duel;
    use crate::progression::LevelUpReason;

    #[test]
    fn unlock_adds_action_and_reports_points_spent() {
        let mut duel = duel();
        duel.drain_events();

        let unlock = duel.unlock_skill(Side::Player, SpellId::Fireball).unwrap();

        assert_eq!(unlock.level, 1);
        let entry = duel
            .combatant(Side::Player)
            .actions()
            .get(SpellId::Fireball)
            .copied()
            .unwrap();
        assert_eq!((entry.damage, entry.cost), (30, 40));
        assert_eq!(
            duel.drain_events(),
            vec![
                GameEvent::SkillUnlocked {
                    side: Side::Player,
                    spell: SpellId::Fireball,
                    level: 1
                },
                GameEvent::LevelUp {
                    side: Side::Player,
                    level: 1,
                    skill_points: 0,
                    reason: LevelUpReason::PointsSpent
                },
            ]
        );
    }

    #[test]
    fn failed_unlock_emits_nothing() {
        let mut duel = duel();
        duel.drain_events();

        assert_eq!(
            duel.unlock_skill(Side::Ai, SpellId::BasicAttack),
            Err(UnlockError::DefaultSkillProtected)
        );
        assert!(duel.events().is_empty());
        assert_eq!(duel.combatant(Side::Ai).ledger.skill_points(), 1);
    }
}
