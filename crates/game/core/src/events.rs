//! Observable outcomes of the duel.
//!
//! [`Duel`](crate::engine::Duel) pushes a [`GameEvent`] for every visible
//! change into its [`EventQueue`]; the host drains the queue after each step.

use core::time::Duration;
use std::collections::VecDeque;

use crate::action::{ActorRef, ItemKind};
use crate::progression::LevelUpReason;
use crate::spell::SpellId;
use crate::state::{NpcId, Position, Side};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    DamageDealt {
        attacker: Side,
        target: ActorRef,
        amount: u32,
        position: Position,
    },
    CounterAttack {
        npc: NpcId,
        attacker: Side,
        amount: u32,
    },
    /// A cast was refused for lack of resource. Hosts show a notice for
    /// `display_for`.
    NoResourceForAction {
        side: Side,
        spell: SpellId,
        required: u32,
        available: u32,
        display_for: Duration,
    },
    LevelUp {
        side: Side,
        level: u32,
        skill_points: u32,
        reason: LevelUpReason,
    },
    SkillUnlocked {
        side: Side,
        spell: SpellId,
        level: u32,
    },
    RewardsGranted {
        side: Side,
        xp: u32,
        gold: u32,
    },
    ResourceRegenerated {
        side: Side,
        amount: u32,
        resource: u32,
    },
    ItemPurchased {
        side: Side,
        item: ItemKind,
        health: u32,
        gold: u32,
    },
    ActorDefeated {
        actor: ActorRef,
    },
    NpcRespawned {
        npc: NpcId,
        level: u32,
        health: u32,
    },
    TurnStarted {
        side: Side,
    },
    MatchOver {
        winner_is_player: bool,
    },
}

/// FIFO buffer of undelivered events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
