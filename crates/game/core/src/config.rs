//! Game configuration constants and tunable parameters.

use core::time::Duration;

use crate::spell::SpellId;

/// Rules shared by both combatants.
///
/// Every value here is tunable from `config.toml`; the compile-time
/// constants on [`GameConfig`] are not.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub starting: StartingStats,
    pub leveling: LevelingRules,
    pub turns: TurnRules,
    pub shop: ShopRules,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Global health ceiling shared by both combatants.
    pub const HEALTH_CAP: u32 = 500;
    /// The always-unlocked, zero-cost baseline attack.
    pub const DEFAULT_ACTION: SpellId = SpellId::BasicAttack;
    /// Skill points spent per unlock or upgrade.
    pub const SKILL_POINT_COST: u32 = 1;

    pub fn new() -> Self {
        Self {
            starting: StartingStats::default(),
            leveling: LevelingRules::default(),
            turns: TurnRules::default(),
            shop: ShopRules::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Ledger values every combatant spawns with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StartingStats {
    pub level: u32,
    pub xp_to_next_level: u32,
    pub gold: u32,
    pub skill_points: u32,
    pub attack_power: u32,
    pub health: u32,
    pub max_resource: u32,
}

impl Default for StartingStats {
    fn default() -> Self {
        Self {
            level: 1,
            xp_to_next_level: 100,
            gold: 0,
            skill_points: 1,
            attack_power: 10,
            health: 100,
            max_resource: 100,
        }
    }
}

/// Per-level growth applied by `ProgressionLedger::gain_xp`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelingRules {
    pub xp_step: u32,
    pub attack_power_per_level: u32,
    pub health_per_level: u32,
    pub skill_points_per_level: u32,
}

impl Default for LevelingRules {
    fn default() -> Self {
        Self {
            xp_step: 50,
            attack_power_per_level: 5,
            health_per_level: 10,
            skill_points_per_level: 1,
        }
    }
}

/// Turn budget, regeneration and pacing delays.
///
/// Delays are stored in milliseconds so they round-trip through TOML.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnRules {
    pub actions_per_turn: u8,
    pub resource_per_turn: u32,
    pub ai_turn_delay_ms: u64,
    pub ai_first_action_delay_ms: u64,
    pub ai_next_action_delay_ms: u64,
    pub ai_turn_end_delay_ms: u64,
    pub respawn_delay_ms: u64,
    pub no_resource_display_ms: u64,
}

impl TurnRules {
    pub fn ai_turn_delay(&self) -> Duration {
        Duration::from_millis(self.ai_turn_delay_ms)
    }

    pub fn ai_first_action_delay(&self) -> Duration {
        Duration::from_millis(self.ai_first_action_delay_ms)
    }

    pub fn ai_next_action_delay(&self) -> Duration {
        Duration::from_millis(self.ai_next_action_delay_ms)
    }

    pub fn ai_turn_end_delay(&self) -> Duration {
        Duration::from_millis(self.ai_turn_end_delay_ms)
    }

    pub fn respawn_delay(&self) -> Duration {
        Duration::from_millis(self.respawn_delay_ms)
    }

    pub fn no_resource_display(&self) -> Duration {
        Duration::from_millis(self.no_resource_display_ms)
    }
}

impl Default for TurnRules {
    fn default() -> Self {
        Self {
            actions_per_turn: 2,
            resource_per_turn: 15,
            ai_turn_delay_ms: 2_000,
            ai_first_action_delay_ms: 1_000,
            ai_next_action_delay_ms: 2_000,
            ai_turn_end_delay_ms: 2_000,
            respawn_delay_ms: 1_000,
            no_resource_display_ms: 2_000,
        }
    }
}

/// The single purchasable item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShopRules {
    pub health_potion_cost: u32,
    pub health_potion_restore: u32,
}

impl Default for ShopRules {
    fn default() -> Self {
        Self {
            health_potion_cost: 50,
            health_potion_restore: 50,
        }
    }
}
