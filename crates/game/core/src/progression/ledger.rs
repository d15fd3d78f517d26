use std::collections::BTreeMap;

use super::UnlockError;
use crate::config::{GameConfig, LevelingRules, StartingStats};
use crate::spell::{SpellCatalog, SpellId};

/// Why a [`ProgressionNotice`] was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelUpReason {
    LevelGained,
    PointsSpent,
}

/// Level/skill-point snapshot returned by ledger mutations.
///
/// The ledger never publishes anything itself; callers turn notices into
/// events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionNotice {
    pub level: u32,
    pub skill_points: u32,
    pub reason: LevelUpReason,
}

/// Numbers owned by one combatant.
///
/// Health is clamped to `[0, GameConfig::HEALTH_CAP]`, resource to
/// `[0, max_resource]`, and `xp < xp_to_next_level` after every call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionLedger {
    level: u32,
    xp: u32,
    xp_to_next_level: u32,
    gold: u32,
    skill_points: u32,
    attack_power: u32,
    health: u32,
    max_health: u32,
    resource: u32,
    max_resource: u32,
    /// Absent means locked. The default action is never stored.
    skills: BTreeMap<SpellId, u32>,
    leveling: LevelingRules,
}

impl ProgressionLedger {
    pub fn new(starting: &StartingStats, leveling: &LevelingRules) -> Self {
        let health = starting.health.min(GameConfig::HEALTH_CAP);
        Self {
            level: starting.level.max(1),
            xp: 0,
            xp_to_next_level: starting.xp_to_next_level,
            gold: starting.gold,
            skill_points: starting.skill_points,
            attack_power: starting.attack_power,
            health,
            max_health: health,
            resource: starting.max_resource,
            max_resource: starting.max_resource,
            skills: BTreeMap::new(),
            leveling: leveling.clone(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(&config.starting, &config.leveling)
    }

    // ===== accessors =====

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn xp_to_next_level(&self) -> u32 {
        self.xp_to_next_level
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn resource(&self) -> u32 {
        self.resource
    }

    pub fn max_resource(&self) -> u32 {
        self.max_resource
    }

    /// Stored level of `spell`, 0 when locked.
    ///
    /// The default action is not stored here; use
    /// [`Combatant::spell_level`](crate::state::Combatant::spell_level) for
    /// the effective level.
    pub fn skill_level(&self, spell: SpellId) -> u32 {
        self.skills.get(&spell).copied().unwrap_or(0)
    }

    pub fn is_unlocked(&self, spell: SpellId) -> bool {
        self.skill_level(spell) > 0
    }

    pub fn unlocked_skills(&self) -> impl Iterator<Item = (SpellId, u32)> + '_ {
        self.skills.iter().map(|(&spell, &level)| (spell, level))
    }

    // ===== experience and currency =====

    /// Adds XP and applies every level-up it pays for.
    ///
    /// Returns one notice per level gained, in order.
    pub fn gain_xp(&mut self, amount: u32) -> Vec<ProgressionNotice> {
        self.xp = self.xp.saturating_add(amount);

        let mut notices = Vec::new();
        while self.xp_to_next_level > 0 && self.xp >= self.xp_to_next_level {
            self.xp -= self.xp_to_next_level;
            self.level += 1;
            self.xp_to_next_level = self.xp_to_next_level.saturating_add(self.leveling.xp_step);
            self.attack_power = self
                .attack_power
                .saturating_add(self.leveling.attack_power_per_level);
            self.skill_points = self
                .skill_points
                .saturating_add(self.leveling.skill_points_per_level);
            self.max_health = self
                .max_health
                .saturating_add(self.leveling.health_per_level)
                .min(GameConfig::HEALTH_CAP);
            self.health = self
                .health
                .saturating_add(self.leveling.health_per_level)
                .min(GameConfig::HEALTH_CAP);

            notices.push(ProgressionNotice {
                level: self.level,
                skill_points: self.skill_points,
                reason: LevelUpReason::LevelGained,
            });
        }
        notices
    }

    pub fn gain_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Deducts `amount` gold if affordable. Returns false and leaves gold
    /// untouched otherwise.
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        match self.gold.checked_sub(amount) {
            Some(rest) => {
                self.gold = rest;
                true
            }
            None => false,
        }
    }

    // ===== skill points =====

    pub fn spend_skill_points(&mut self, amount: u32) -> Result<ProgressionNotice, UnlockError> {
        let Some(rest) = self.skill_points.checked_sub(amount) else {
            return Err(UnlockError::InsufficientSkillPoints {
                required: amount,
                available: self.skill_points,
            });
        };
        self.skill_points = rest;
        Ok(ProgressionNotice {
            level: self.level,
            skill_points: self.skill_points,
            reason: LevelUpReason::PointsSpent,
        })
    }

    pub fn refund_skill_points(&mut self, amount: u32) {
        self.skill_points = self.skill_points.saturating_add(amount);
    }

    /// Writes the stored level of `spell`. The default action is never
    /// stored, so writes to it are ignored.
    pub(crate) fn set_skill_level(&mut self, spell: SpellId, level: u32) {
        if spell == GameConfig::DEFAULT_ACTION {
            return;
        }
        if level == 0 {
            self.skills.remove(&spell);
        } else {
            self.skills.insert(spell, level);
        }
    }

    /// Stores every `default_unlocked` spell other than the default action at
    /// level 1. Spells already at a higher level are left alone.
    pub(crate) fn grant_default_skills(&mut self, catalog: &SpellCatalog) {
        for definition in catalog.iter().filter(|def| def.default_unlocked) {
            if !self.is_unlocked(definition.id) {
                self.set_skill_level(definition.id, 1);
            }
        }
    }

    // ===== health and resource =====

    /// Applies `delta` to the resource pool, clamped to `[0, max_resource]`.
    /// Returns the new value.
    pub fn adjust_resource(&mut self, delta: i64) -> u32 {
        self.resource = clamp_delta(self.resource, delta, self.max_resource);
        self.resource
    }

    /// Applies `delta` to health, clamped to `[0, HEALTH_CAP]`. Returns the
    /// new value.
    pub fn adjust_health(&mut self, delta: i64) -> u32 {
        self.health = clamp_delta(self.health, delta, GameConfig::HEALTH_CAP);
        self.health
    }

    /// Per-turn regeneration. Returns the amount actually restored.
    pub fn regenerate_resource(&mut self, per_turn: u32) -> u32 {
        let before = self.resource;
        self.adjust_resource(i64::from(per_turn));
        self.resource - before
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}

fn clamp_delta(current: u32, delta: i64, max: u32) -> u32 {
    let next = i64::from(current).saturating_add(delta);
    next.clamp(0, i64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spell::fixtures::stock_definitions;

    fn fresh() -> ProgressionLedger {
        ProgressionLedger::from_config(&GameConfig::default())
    }

    #[test]
    fn starts_with_configured_defaults() {
        let ledger = fresh();
        assert_eq!(ledger.level(), 1);
        assert_eq!(ledger.xp(), 0);
        assert_eq!(ledger.xp_to_next_level(), 100);
        assert_eq!(ledger.gold(), 0);
        assert_eq!(ledger.skill_points(), 1);
        assert_eq!(ledger.attack_power(), 10);
        assert_eq!(ledger.health(), 100);
        assert_eq!(ledger.max_health(), 100);
        assert_eq!(ledger.resource(), 100);
        assert_eq!(ledger.max_resource(), 100);
        assert_eq!(ledger.unlocked_skills().count(), 0);
    }

    #[test]
    fn gain_xp_carries_over_multiple_levels() {
        let mut ledger = fresh();
        // 100 for level 2, 150 for level 3, 30 left over
        let notices = ledger.gain_xp(280);

        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, 2);
        assert_eq!(notices[1].level, 3);
        assert!(notices.iter().all(|n| n.reason == LevelUpReason::LevelGained));
        assert_eq!(ledger.level(), 3);
        assert_eq!(ledger.xp(), 30);
        assert_eq!(ledger.xp_to_next_level(), 200);
        assert_eq!(ledger.attack_power(), 20);
        assert_eq!(ledger.skill_points(), 3);
        assert_eq!(notices[1].skill_points, 3);
        assert_eq!(ledger.max_health(), 120);
        assert_eq!(ledger.health(), 120);
    }

    #[test]
    fn gain_xp_below_threshold_raises_nothing() {
        let mut ledger = fresh();
        assert!(ledger.gain_xp(99).is_empty());
        assert_eq!(ledger.level(), 1);
        assert!(ledger.xp() < ledger.xp_to_next_level());
    }

    #[test]
    fn health_stays_within_zero_and_cap() {
        let mut ledger = fresh();
        assert_eq!(ledger.adjust_health(10_000), GameConfig::HEALTH_CAP);
        assert_eq!(ledger.adjust_health(-10_000), 0);
        assert!(ledger.is_defeated());
        for delta in [-7, 300, 300, -1_000, 45] {
            let health = ledger.adjust_health(delta);
            assert!(health <= GameConfig::HEALTH_CAP);
        }
        assert_eq!(ledger.health(), 45);
    }

    #[test]
    fn regen_at_max_is_a_no_op() {
        let mut ledger = fresh();
        assert_eq!(ledger.regenerate_resource(15), 0);
        assert_eq!(ledger.resource(), 100);

        ledger.adjust_resource(-20);
        assert_eq!(ledger.regenerate_resource(15), 15);
        assert_eq!(ledger.regenerate_resource(15), 5);
        assert_eq!(ledger.resource(), 100);
    }

    #[test]
    fn spend_skill_points_checks_balance() {
        let mut ledger = fresh();
        assert_eq!(
            ledger.spend_skill_points(2),
            Err(UnlockError::InsufficientSkillPoints {
                required: 2,
                available: 1
            })
        );
        assert_eq!(ledger.skill_points(), 1);

        let notice = ledger.spend_skill_points(1).unwrap();
        assert_eq!(notice.reason, LevelUpReason::PointsSpent);
        assert_eq!(notice.skill_points, 0);

        ledger.refund_skill_points(1);
        assert_eq!(ledger.skill_points(), 1);
    }

    #[test]
    fn spend_gold_is_all_or_nothing() {
        let mut ledger = fresh();
        ledger.gain_gold(40);
        assert!(!ledger.spend_gold(50));
        assert_eq!(ledger.gold(), 40);
        ledger.gain_gold(10);
        assert!(ledger.spend_gold(50));
        assert_eq!(ledger.gold(), 0);
    }

    #[test]
    fn default_action_level_is_never_stored() {
        let mut ledger = fresh();
        ledger.set_skill_level(SpellId::BasicAttack, 2);
        assert_eq!(ledger.skill_level(SpellId::BasicAttack), 0);
        assert_eq!(ledger.unlocked_skills().count(), 0);
    }

    #[test]
    fn default_unlocked_spells_start_at_level_one() {
        let mut definitions = stock_definitions();
        definitions[2].default_unlocked = true;
        let catalog = SpellCatalog::new(definitions).unwrap();
        let mut ledger = fresh();

        ledger.grant_default_skills(&catalog);

        assert_eq!(ledger.skill_level(SpellId::IceBolt), 1);
        assert_eq!(ledger.skill_level(SpellId::BasicAttack), 0);
        assert_eq!(
            ledger.unlocked_skills().collect::<Vec<_>>(),
            vec![(SpellId::IceBolt, 1)]
        );
    }
}
