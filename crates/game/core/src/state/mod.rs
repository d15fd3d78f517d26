//! Authoritative match state types.
//!
//! This module owns the data that describes a duel at a specific moment:
//! the two combatants, the NPC roster, and the turn controller. Mutation
//! entry points live on [`Duel`](crate::engine::Duel).
mod combatant;
mod npc;
mod turn;

pub use combatant::{ActionEntry, ActionTable, Combatant, Side};
pub use npc::{Npc, NpcId, NpcKind, NpcRoster, NpcState, NpcTemplate, NpcTemplates, RespawnScaling};
pub use turn::{AiStep, TurnController, TurnPhase, TurnSignal};

/// Grid anchor of an actor, used for engagement and event placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
