//! Duel orchestration.
//!
//! [`Duel`] owns every piece of match state and is the only place where it
//! changes. Operations are split by concern across the submodules:
//! casting in `cast`, skill purchases in `progression`, the shop in `shop`,
//! and time/turn handling in `turns`. Each operation validates fully before
//! mutating and reports what happened through the event queue.

mod cast;
mod progression;
mod shop;
mod turns;

use std::sync::Arc;

use crate::action::Target;
use crate::config::GameConfig;
use crate::events::{EventQueue, GameEvent};
use crate::progression::ProgressionLedger;
use crate::spell::SpellCatalog;
use crate::state::{
    Combatant, Npc, NpcId, NpcRoster, NpcTemplates, Position, Side, TurnController, TurnPhase,
};

/// Read-only copy of the match for hosts and UIs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelSnapshot {
    pub player: Combatant,
    pub ai: Combatant,
    pub npcs: NpcRoster,
    pub phase: TurnPhase,
}

/// A single player-versus-AI match.
///
/// Constructed once with its catalog and configuration injected; nothing is
/// looked up at runtime.
#[derive(Clone, Debug)]
pub struct Duel {
    config: GameConfig,
    catalog: Arc<SpellCatalog>,
    player: Combatant,
    ai: Combatant,
    npcs: NpcRoster,
    turns: TurnController,
    events: EventQueue,
}

impl Duel {
    /// Creates a match and starts the player's first turn.
    pub fn new(config: GameConfig, catalog: Arc<SpellCatalog>, npcs: &NpcTemplates) -> Self {
        let player = Combatant::new(
            Side::Player,
            ProgressionLedger::from_config(&config),
            Position::new(-2, 0),
            &catalog,
        );
        let ai = Combatant::new(
            Side::Ai,
            ProgressionLedger::from_config(&config),
            Position::new(2, 0),
            &catalog,
        );
        let turns = TurnController::new(config.turns.clone());

        let mut duel = Self {
            config,
            catalog,
            player,
            ai,
            npcs: NpcRoster::new(npcs),
            turns,
            events: EventQueue::default(),
        };
        duel.begin_turn(Side::Player);
        duel
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<SpellCatalog> {
        &self.catalog
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    pub(crate) fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }

    pub fn npc(&self, id: NpcId) -> &Npc {
        self.npcs.get(id)
    }

    pub fn npcs(&self) -> &NpcRoster {
        &self.npcs
    }

    pub fn turns(&self) -> &TurnController {
        &self.turns
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Removes and returns every queued event in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    /// Stores `target` as `side`'s selection for the next
    /// [`request_cast`](Self::request_cast).
    pub fn select_target(&mut self, side: Side, target: Option<Target>) {
        self.combatant_mut(side).select_target(target);
    }

    /// Takes the AI out of turn rotation (used when no AI policy is wired).
    pub fn exclude_ai(&mut self) {
        self.turns.exclude_ai();
    }

    pub fn snapshot(&self) -> DuelSnapshot {
        DuelSnapshot {
            player: self.player.clone(),
            ai: self.ai.clone(),
            npcs: self.npcs.clone(),
            phase: self.turns.phase(),
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::spell::fixtures::stock_catalog;

    pub(crate) fn duel() -> Duel {
        Duel::new(
            GameConfig::default(),
            Arc::new(stock_catalog()),
            &NpcTemplates::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_duel_opens_player_turn() {
        let mut duel = fixtures::duel();

        assert_eq!(
            duel.turns().phase(),
            TurnPhase::PlayerTurn {
                actions_remaining: 2
            }
        );
        let events = duel.drain_events();
        assert!(events.contains(&GameEvent::TurnStarted { side: Side::Player }));
        assert!(duel.events().is_empty());
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut duel = fixtures::duel();
        duel.select_target(Side::Player, Some(Target::MiniBoss));

        let snapshot = duel.snapshot();
        assert_eq!(snapshot.player.selected_target(), Some(Target::MiniBoss));
        assert_eq!(snapshot.npcs.get(NpcId::MiniBoss).level, 3);
        assert_eq!(snapshot.ai.ledger.health(), 100);
    }
}
