//! Target selection weights.

use game_core::{Duel, NpcId, Side, Target};
use rand::Rng;

/// Relative odds (in percent) of each attack target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetWeights {
    pub mob: u32,
    pub opponent: u32,
    pub mini_boss: u32,
}

impl TargetWeights {
    /// Weights for a given `mini_boss_level - ai_level` gap.
    ///
    /// The further the mini boss is ahead, the more the AI farms its own mob.
    pub fn for_level_gap(gap: i64) -> Self {
        match gap {
            g if g >= 2 => Self {
                mob: 70,
                opponent: 28,
                mini_boss: 2,
            },
            1 => Self {
                mob: 55,
                opponent: 35,
                mini_boss: 10,
            },
            _ => Self {
                mob: 15,
                opponent: 25,
                mini_boss: 60,
            },
        }
    }

    /// Weights for the AI's current standing in `duel`.
    pub fn for_duel(duel: &Duel) -> Self {
        let mini_boss = i64::from(duel.npc(NpcId::MiniBoss).level);
        let ai = i64::from(duel.combatant(Side::Ai).ledger.level());
        Self::for_level_gap(mini_boss - ai)
    }

    pub fn total(&self) -> u32 {
        self.mob + self.opponent + self.mini_boss
    }

    /// Maps a roll in `0..total()` onto a target.
    pub fn target_for_roll(&self, roll: u32) -> Target {
        if roll < self.mob {
            Target::Mob
        } else if roll < self.mob + self.opponent {
            Target::Opponent
        } else {
            Target::MiniBoss
        }
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Target {
        self.target_for_roll(rng.gen_range(0..self.total()))
    }
}

/// Draws a target and falls back to the opponent when the drawn NPC is
/// waiting to respawn.
pub fn choose_target<R: Rng + ?Sized>(duel: &Duel, rng: &mut R) -> Target {
    let target = TargetWeights::for_duel(duel).pick(rng);
    let npc = match target {
        Target::Mob => NpcId::lane_mob(Side::Ai),
        Target::MiniBoss => NpcId::MiniBoss,
        Target::Opponent => return target,
    };
    if duel.npc(npc).is_alive() {
        target
    } else {
        Target::Opponent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn weight_tables_by_gap() {
        assert_eq!(TargetWeights::for_level_gap(5).mob, 70);
        assert_eq!(TargetWeights::for_level_gap(2).mini_boss, 2);
        assert_eq!(TargetWeights::for_level_gap(1).opponent, 35);
        assert_eq!(TargetWeights::for_level_gap(0).mini_boss, 60);
        assert_eq!(TargetWeights::for_level_gap(-3).mob, 15);
        assert_eq!(TargetWeights::for_level_gap(1).total(), 100);
    }

    #[test]
    fn rolls_map_onto_cumulative_bands() {
        let weights = TargetWeights::for_level_gap(2);
        assert_eq!(weights.target_for_roll(0), Target::Mob);
        assert_eq!(weights.target_for_roll(69), Target::Mob);
        assert_eq!(weights.target_for_roll(70), Target::Opponent);
        assert_eq!(weights.target_for_roll(97), Target::Opponent);
        assert_eq!(weights.target_for_roll(98), Target::MiniBoss);
        assert_eq!(weights.target_for_roll(99), Target::MiniBoss);
    }

    #[test]
    fn draws_roughly_follow_weights() {
        let weights = TargetWeights::for_level_gap(0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let draws = 10_000;
        let boss = (0..draws)
            .filter(|_| weights.pick(&mut rng) == Target::MiniBoss)
            .count();

        assert!((5_500..6_500).contains(&boss), "mini boss drawn {boss} times");
    }
}
