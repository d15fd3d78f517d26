//! Action vocabulary: targets, pending casts, outcomes and purchasable items.
//!
//! Execution lives on [`Duel`](crate::engine::Duel); this module only holds
//! the types that flow in and out of it.

mod error;

pub use error::{CastError, PurchaseError};

use core::fmt;

use crate::spell::SpellId;
use crate::state::{NpcId, Position, Side};

/// Target chosen relative to the acting side.
///
/// `Mob` always means the actor's own lane mob; `MiniBoss` is shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Opponent,
    Mob,
    MiniBoss,
}

impl Target {
    /// Resolves this relative target into an absolute actor for `actor`.
    pub fn resolve(self, actor: Side) -> ActorRef {
        match self {
            Target::Opponent => ActorRef::Combatant(actor.opponent()),
            Target::Mob => ActorRef::Npc(NpcId::lane_mob(actor)),
            Target::MiniBoss => ActorRef::Npc(NpcId::MiniBoss),
        }
    }
}

/// Absolute reference to anything that can be hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorRef {
    Combatant(Side),
    Npc(NpcId),
}

impl fmt::Display for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorRef::Combatant(side) => write!(f, "{side}"),
            ActorRef::Npc(npc) => write!(f, "{npc}"),
        }
    }
}

/// A validated cast whose cost is already paid, waiting for the caster to
/// reach engagement range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingCast {
    pub spell: SpellId,
    pub spell_level: u32,
    pub target: ActorRef,
    /// Target position captured when the cast began.
    pub target_position: Position,
    pub resource_spent: u32,
}

/// What a resolved cast did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastOutcome {
    pub spell: SpellId,
    pub target: ActorRef,
    /// 0 when the target was already dead on arrival.
    pub damage_dealt: u32,
    pub counter_damage: u32,
    pub target_defeated: bool,
}

/// Items sold by the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    HealthPotion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mob_target_is_the_actors_own_lane() {
        assert_eq!(
            Target::Mob.resolve(Side::Player),
            ActorRef::Npc(NpcId::PlayerMob)
        );
        assert_eq!(Target::Mob.resolve(Side::Ai), ActorRef::Npc(NpcId::AiMob));
        assert_eq!(
            Target::MiniBoss.resolve(Side::Ai),
            Target::MiniBoss.resolve(Side::Player)
        );
        assert_eq!(
            Target::Opponent.resolve(Side::Player),
            ActorRef::Combatant(Side::Ai)
        );
    }
}
