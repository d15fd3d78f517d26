use core::time::Duration;

use super::Side;
use crate::config::TurnRules;

/// Where the AI is inside its own turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiStep {
    /// Counting down before the next action is due.
    WaitingToAct { remaining: Duration },
    /// An action is due; waits for [`TurnController::record_action`].
    Acting,
    /// All actions spent; counting down before control returns.
    Ending { remaining: Duration },
}

/// Turn state machine phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    PlayerTurn { actions_remaining: u8 },
    AiTurnPending { remaining: Duration },
    AiTurn { actions_remaining: u8, step: AiStep },
    GameOver { winner: Side },
}

/// Transitions reported by [`TurnController::advance`] and
/// [`TurnController::record_action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnSignal {
    PlayerTurnStarted,
    PlayerTurnEnded,
    AiTurnStarted,
    /// The AI should pick and cast its next action now.
    AiActionDue,
    /// The AI is excluded from play; its turn passed without acting.
    AiTurnSkipped,
    AiTurnEnded,
}

/// Two-phase turn controller with explicit deadlines.
///
/// Time only moves through [`advance`](Self::advance); nothing here
/// schedules itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnController {
    phase: TurnPhase,
    player_casting: bool,
    ai_casting: bool,
    ai_participating: bool,
    rules: TurnRules,
}

impl TurnController {
    /// Starts in the player's turn with player casting enabled.
    pub fn new(rules: TurnRules) -> Self {
        Self {
            phase: TurnPhase::PlayerTurn {
                actions_remaining: rules.actions_per_turn,
            },
            player_casting: true,
            ai_casting: false,
            ai_participating: true,
            rules,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// True when `side` may begin an action right now.
    pub fn casting_enabled(&self, side: Side) -> bool {
        let flag = match side {
            Side::Player => self.player_casting,
            Side::Ai => self.ai_casting,
        };
        flag && self.actions_remaining(side) > 0
    }

    /// Actions left for `side` in the current turn, 0 when it is not that
    /// side's turn.
    pub fn actions_remaining(&self, side: Side) -> u8 {
        match (self.phase, side) {
            (TurnPhase::PlayerTurn { actions_remaining }, Side::Player) => actions_remaining,
            (
                TurnPhase::AiTurn {
                    actions_remaining, ..
                },
                Side::Ai,
            ) => actions_remaining,
            _ => 0,
        }
    }

    /// Side whose turn it is, `None` between turns and after the match.
    pub fn active_side(&self) -> Option<Side> {
        match self.phase {
            TurnPhase::PlayerTurn { .. } => Some(Side::Player),
            TurnPhase::AiTurn { .. } => Some(Side::Ai),
            TurnPhase::AiTurnPending { .. } | TurnPhase::GameOver { .. } => None,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Removes the AI from turn rotation. Its turns are skipped from now on.
    pub fn exclude_ai(&mut self) {
        self.ai_participating = false;
    }

    /// Counts one resolved action against `side`'s budget.
    ///
    /// Ignored when it is not `side`'s turn or its budget is spent.
    pub fn record_action(&mut self, side: Side) -> Option<TurnSignal> {
        match (self.phase, side) {
            (TurnPhase::PlayerTurn { actions_remaining }, Side::Player)
                if actions_remaining > 0 =>
            {
                let actions_remaining = actions_remaining - 1;
                if actions_remaining == 0 {
                    self.player_casting = false;
                    self.phase = TurnPhase::AiTurnPending {
                        remaining: self.rules.ai_turn_delay(),
                    };
                    Some(TurnSignal::PlayerTurnEnded)
                } else {
                    self.phase = TurnPhase::PlayerTurn { actions_remaining };
                    None
                }
            }
            (
                TurnPhase::AiTurn {
                    actions_remaining, ..
                },
                Side::Ai,
            ) if actions_remaining > 0 => {
                let actions_remaining = actions_remaining - 1;
                let step = if actions_remaining == 0 {
                    AiStep::Ending {
                        remaining: self.rules.ai_turn_end_delay(),
                    }
                } else {
                    AiStep::WaitingToAct {
                        remaining: self.rules.ai_next_action_delay(),
                    }
                };
                self.phase = TurnPhase::AiTurn {
                    actions_remaining,
                    step,
                };
                None
            }
            _ => None,
        }
    }

    /// Moves time forward by `dt`, firing every deadline that elapses.
    ///
    /// Leftover time carries into the next phase, except that an
    /// [`AiStep::Acting`] step stops the clock until the AI acts.
    pub fn advance(&mut self, dt: Duration) -> Vec<TurnSignal> {
        let mut signals = Vec::new();
        let mut budget = dt;

        loop {
            match self.phase {
                TurnPhase::GameOver { .. } | TurnPhase::PlayerTurn { .. } => break,
                TurnPhase::AiTurnPending { remaining } => {
                    if budget < remaining {
                        self.phase = TurnPhase::AiTurnPending {
                            remaining: remaining - budget,
                        };
                        break;
                    }
                    budget -= remaining;
                    if self.ai_participating {
                        self.ai_casting = true;
                        self.phase = TurnPhase::AiTurn {
                            actions_remaining: self.rules.actions_per_turn,
                            step: AiStep::WaitingToAct {
                                remaining: self.rules.ai_first_action_delay(),
                            },
                        };
                        signals.push(TurnSignal::AiTurnStarted);
                    } else {
                        signals.push(TurnSignal::AiTurnSkipped);
                        self.start_player_turn();
                        signals.push(TurnSignal::PlayerTurnStarted);
                    }
                }
                TurnPhase::AiTurn {
                    actions_remaining,
                    step,
                } => match step {
                    AiStep::Acting => break,
                    AiStep::WaitingToAct { remaining } => {
                        if budget < remaining {
                            self.phase = TurnPhase::AiTurn {
                                actions_remaining,
                                step: AiStep::WaitingToAct {
                                    remaining: remaining - budget,
                                },
                            };
                            break;
                        }
                        self.phase = TurnPhase::AiTurn {
                            actions_remaining,
                            step: AiStep::Acting,
                        };
                        signals.push(TurnSignal::AiActionDue);
                        break;
                    }
                    AiStep::Ending { remaining } => {
                        if budget < remaining {
                            self.phase = TurnPhase::AiTurn {
                                actions_remaining,
                                step: AiStep::Ending {
                                    remaining: remaining - budget,
                                },
                            };
                            break;
                        }
                        budget -= remaining;
                        self.ai_casting = false;
                        signals.push(TurnSignal::AiTurnEnded);
                        self.start_player_turn();
                        signals.push(TurnSignal::PlayerTurnStarted);
                    }
                },
            }
        }

        signals
    }

    /// Ends the match. Both casting flags stay off from now on.
    pub fn finish(&mut self, winner: Side) {
        self.phase = TurnPhase::GameOver { winner };
        self.player_casting = false;
        self.ai_casting = false;
    }

    fn start_player_turn(&mut self) {
        self.phase = TurnPhase::PlayerTurn {
            actions_remaining: self.rules.actions_per_turn,
        };
        self.player_casting = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> TurnController {
        TurnController::new(TurnRules::default())
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn starts_in_player_turn() {
        let turns = controller();
        assert_eq!(
            turns.phase(),
            TurnPhase::PlayerTurn {
                actions_remaining: 2
            }
        );
        assert!(turns.casting_enabled(Side::Player));
        assert!(!turns.casting_enabled(Side::Ai));
    }

    #[test]
    fn two_player_actions_hand_over_to_ai() {
        let mut turns = controller();

        assert_eq!(turns.record_action(Side::Player), None);
        assert_eq!(turns.actions_remaining(Side::Player), 1);
        assert_eq!(
            turns.record_action(Side::Player),
            Some(TurnSignal::PlayerTurnEnded)
        );
        assert!(!turns.casting_enabled(Side::Player));
        assert_eq!(
            turns.phase(),
            TurnPhase::AiTurnPending { remaining: secs(2) }
        );

        assert!(turns.advance(Duration::from_millis(1_999)).is_empty());
        assert_eq!(
            turns.advance(Duration::from_millis(1)),
            vec![TurnSignal::AiTurnStarted]
        );
        assert!(turns.casting_enabled(Side::Ai));
        assert_eq!(turns.active_side(), Some(Side::Ai));
    }

    #[test]
    fn full_ai_turn_returns_control() {
        let mut turns = controller();
        turns.record_action(Side::Player);
        turns.record_action(Side::Player);

        assert_eq!(
            turns.advance(secs(3)),
            vec![TurnSignal::AiTurnStarted, TurnSignal::AiActionDue]
        );
        // Acting holds the clock.
        assert!(turns.advance(secs(10)).is_empty());

        turns.record_action(Side::Ai);
        assert!(turns.advance(secs(1)).is_empty());
        assert_eq!(turns.advance(secs(1)), vec![TurnSignal::AiActionDue]);

        turns.record_action(Side::Ai);
        assert!(!turns.casting_enabled(Side::Ai));
        assert_eq!(
            turns.advance(secs(2)),
            vec![TurnSignal::AiTurnEnded, TurnSignal::PlayerTurnStarted]
        );
        assert_eq!(
            turns.phase(),
            TurnPhase::PlayerTurn {
                actions_remaining: 2
            }
        );
        assert!(turns.casting_enabled(Side::Player));
        assert!(!turns.casting_enabled(Side::Ai));
    }

    #[test]
    fn excluded_ai_is_skipped() {
        let mut turns = controller();
        turns.exclude_ai();
        turns.record_action(Side::Player);
        turns.record_action(Side::Player);

        assert_eq!(
            turns.advance(secs(2)),
            vec![TurnSignal::AiTurnSkipped, TurnSignal::PlayerTurnStarted]
        );
        assert_eq!(turns.active_side(), Some(Side::Player));
    }

    #[test]
    fn off_turn_actions_are_ignored() {
        let mut turns = controller();
        assert_eq!(turns.record_action(Side::Ai), None);
        assert_eq!(turns.actions_remaining(Side::Player), 2);
    }

    #[test]
    fn game_over_is_terminal() {
        let mut turns = controller();
        turns.finish(Side::Ai);

        assert!(!turns.casting_enabled(Side::Player));
        assert!(!turns.casting_enabled(Side::Ai));
        assert!(turns.advance(secs(60)).is_empty());
        assert_eq!(turns.record_action(Side::Player), None);
        assert_eq!(turns.winner(), Some(Side::Ai));
    }
}
