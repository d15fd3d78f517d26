use core::time::Duration;

use super::Duel;
use crate::action::ActorRef;
use crate::events::GameEvent;
use crate::state::{Side, TurnSignal};

/// Time and turn handling for Duel.
impl Duel {
    /// Moves the match clock forward: NPC respawn timers first, then the
    /// turn controller. Regeneration is applied for every turn that starts.
    ///
    /// No-op once the match is over.
    pub fn advance(&mut self, dt: Duration) -> Vec<TurnSignal> {
        if self.is_over() {
            return Vec::new();
        }

        let mut respawned = Vec::new();
        for npc in self.npcs.iter_mut() {
            if npc.advance(dt) {
                respawned.push(GameEvent::NpcRespawned {
                    npc: npc.id,
                    level: npc.level,
                    health: npc.health,
                });
            }
        }
        for event in respawned {
            self.push_event(event);
        }

        let signals = self.turns.advance(dt);
        for signal in &signals {
            match signal {
                TurnSignal::PlayerTurnStarted => self.begin_turn(Side::Player),
                TurnSignal::AiTurnStarted => self.begin_turn(Side::Ai),
                _ => {}
            }
        }
        signals
    }

    /// Spends one of `side`'s actions without effect.
    ///
    /// Keeps the AI turn moving when its policy produces nothing castable.
    /// Returns false when `side` cannot act right now.
    pub fn forfeit_action(&mut self, side: Side) -> bool {
        if !self.turns.casting_enabled(side) || self.combatant(side).pending.is_some() {
            return false;
        }
        self.turns.record_action(side);
        true
    }

    pub fn winner(&self) -> Option<Side> {
        self.turns.winner()
    }

    pub fn is_over(&self) -> bool {
        self.turns.is_over()
    }

    pub(crate) fn begin_turn(&mut self, side: Side) {
        let per_turn = self.config.turns.resource_per_turn;
        let ledger = &mut self.combatant_mut(side).ledger;
        let amount = ledger.regenerate_resource(per_turn);
        let resource = ledger.resource();

        self.push_event(GameEvent::ResourceRegenerated {
            side,
            amount,
            resource,
        });
        self.push_event(GameEvent::TurnStarted { side });
    }

    /// Ends the match when a combatant is at 0 health. The player is checked
    /// first, so a double knockout is a player loss.
    pub(crate) fn check_match_over(&mut self) {
        if self.is_over() {
            return;
        }
        let loser = if self.player.is_defeated() {
            Side::Player
        } else if self.ai.is_defeated() {
            Side::Ai
        } else {
            return;
        };

        let winner = loser.opponent();
        self.turns.finish(winner);
        self.player.pending = None;
        self.ai.pending = None;
        self.push_event(GameEvent::ActorDefeated {
            actor: ActorRef::Combatant(loser),
        });
        self.push_event(GameEvent::MatchOver {
            winner_is_player: winner == Side::Player,
        });
    }
}
