use core::time::Duration;

use super::{Position, Side};

/// The three NPCs on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NpcId {
    /// The player's lane mob.
    PlayerMob,
    /// The AI's lane mob.
    AiMob,
    /// Shared by both sides.
    MiniBoss,
}

impl NpcId {
    pub const fn lane_mob(side: Side) -> NpcId {
        match side {
            Side::Player => NpcId::PlayerMob,
            Side::Ai => NpcId::AiMob,
        }
    }

    pub(crate) const fn kind(self) -> NpcKind {
        match self {
            NpcId::PlayerMob | NpcId::AiMob => NpcKind::Mob,
            NpcId::MiniBoss => NpcKind::MiniBoss,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NpcKind {
    Mob,
    MiniBoss,
}

/// Stat growth applied each time an NPC respawns.
///
/// On respawn, with `level` the level before the increment:
/// `health = health_base + level * health_per_level` (also the new max),
/// `xp_reward = xp_base + level * xp_per_level`,
/// `gold_reward = gold_base + level * gold_per_level`,
/// then `level += level_step`. There is no level cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RespawnScaling {
    pub health_base: u32,
    pub health_per_level: u32,
    pub xp_base: u32,
    pub xp_per_level: u32,
    pub gold_base: u32,
    pub gold_per_level: u32,
    pub level_step: u32,
}

/// Spawn stats for one NPC species.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcTemplate {
    pub health: u32,
    pub xp_reward: u32,
    pub gold_reward: u32,
    pub level: u32,
    /// Base damage used for counterattacks.
    pub melee_damage: u32,
    pub respawn: RespawnScaling,
}

impl NpcTemplate {
    pub const fn mob() -> Self {
        Self {
            health: 50,
            xp_reward: 50,
            gold_reward: 20,
            level: 1,
            melee_damage: 10,
            respawn: RespawnScaling {
                health_base: 50,
                health_per_level: 15,
                xp_base: 50,
                xp_per_level: 10,
                gold_base: 20,
                gold_per_level: 5,
                level_step: 1,
            },
        }
    }

    pub const fn mini_boss() -> Self {
        Self {
            health: 100,
            xp_reward: 180,
            gold_reward: 50,
            level: 3,
            melee_damage: 30,
            respawn: RespawnScaling {
                health_base: 100,
                health_per_level: 10,
                xp_base: 180,
                xp_per_level: 10,
                gold_base: 50,
                gold_per_level: 5,
                level_step: 3,
            },
        }
    }
}

/// Templates for both species, as loaded from `npcs.ron`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcTemplates {
    pub mob: NpcTemplate,
    pub mini_boss: NpcTemplate,
}

impl NpcTemplates {
    pub(crate) fn template(&self, kind: NpcKind) -> &NpcTemplate {
        match kind {
            NpcKind::Mob => &self.mob,
            NpcKind::MiniBoss => &self.mini_boss,
        }
    }
}

impl Default for NpcTemplates {
    fn default() -> Self {
        Self {
            mob: NpcTemplate::mob(),
            mini_boss: NpcTemplate::mini_boss(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NpcState {
    Alive,
    Dead { respawn_in: Duration },
}

/// A live or respawning NPC.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npc {
    pub id: NpcId,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub xp_reward: u32,
    pub gold_reward: u32,
    pub melee_damage: u32,
    pub position: Position,
    pub state: NpcState,
    scaling: RespawnScaling,
}

impl Npc {
    pub fn from_template(id: NpcId, template: &NpcTemplate, position: Position) -> Self {
        Self {
            id,
            level: template.level,
            health: template.health,
            max_health: template.health,
            xp_reward: template.xp_reward,
            gold_reward: template.gold_reward,
            melee_damage: template.melee_damage,
            position,
            state: NpcState::Alive,
            scaling: template.respawn,
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.state, NpcState::Alive)
    }

    /// Applies damage. Returns true when this hit defeated the NPC, which
    /// then waits `respawn_delay` before coming back.
    pub fn apply_damage(&mut self, amount: u32, respawn_delay: Duration) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.state = NpcState::Dead {
                respawn_in: respawn_delay,
            };
            true
        } else {
            false
        }
    }

    /// Counts down the respawn timer. Returns true when the NPC respawned.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let NpcState::Dead { respawn_in } = self.state else {
            return false;
        };
        let remaining = respawn_in.saturating_sub(dt);
        if remaining.is_zero() {
            self.respawn();
            true
        } else {
            self.state = NpcState::Dead {
                respawn_in: remaining,
            };
            false
        }
    }

    fn respawn(&mut self) {
        let level = self.level;
        let scaling = self.scaling;
        let health = scaling
            .health_base
            .saturating_add(level.saturating_mul(scaling.health_per_level));
        self.health = health;
        self.max_health = health;
        self.xp_reward = scaling
            .xp_base
            .saturating_add(level.saturating_mul(scaling.xp_per_level));
        self.gold_reward = scaling
            .gold_base
            .saturating_add(level.saturating_mul(scaling.gold_per_level));
        self.level = level.saturating_add(scaling.level_step);
        self.state = NpcState::Alive;
    }
}

/// The fixed set of NPCs in a duel.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcRoster {
    player_mob: Npc,
    ai_mob: Npc,
    mini_boss: Npc,
}

impl NpcRoster {
    pub fn new(templates: &NpcTemplates) -> Self {
        let spawn = |id: NpcId, position: Position| {
            Npc::from_template(id, templates.template(id.kind()), position)
        };
        Self {
            player_mob: spawn(NpcId::PlayerMob, Position::new(-4, 2)),
            ai_mob: spawn(NpcId::AiMob, Position::new(4, 2)),
            mini_boss: spawn(NpcId::MiniBoss, Position::new(0, 6)),
        }
    }

    pub fn get(&self, id: NpcId) -> &Npc {
        match id {
            NpcId::PlayerMob => &self.player_mob,
            NpcId::AiMob => &self.ai_mob,
            NpcId::MiniBoss => &self.mini_boss,
        }
    }

    pub fn get_mut(&mut self, id: NpcId) -> &mut Npc {
        match id {
            NpcId::PlayerMob => &mut self.player_mob,
            NpcId::AiMob => &mut self.ai_mob,
            NpcId::MiniBoss => &mut self.mini_boss,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Npc> {
        [&self.player_mob, &self.ai_mob, &self.mini_boss].into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Npc> {
        [&mut self.player_mob, &mut self.ai_mob, &mut self.mini_boss].into_iter()
    }
}
