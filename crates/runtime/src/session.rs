//! Match session: a [`Duel`] plus the AI policy that drives its second seat.
//!
//! The session is synchronous. It turns player requests and clock ticks into
//! engine calls, runs the AI whenever the turn controller says an AI action
//! is due, and collects the resulting [`GameEvent`]s into an outbox for the
//! worker to publish.

use std::time::Duration;

use game_core::{
    CastError, CastOutcome, Duel, DuelSnapshot, GameConfig, GameError, GameEvent, ItemKind,
    LevelUpReason, PurchaseError, Side, SkillUnlock, SpellId, Target, TurnSignal, UnlockError,
};
use tracing::{debug, error, info, warn};

use crate::api::{AiDecision, AiPolicy};

pub struct MatchSession {
    duel: Duel,
    policy: Option<Box<dyn AiPolicy>>,
    auto_arrive: bool,
    outbox: Vec<GameEvent>,
}

impl MatchSession {
    /// Wraps `duel`. Without a policy the AI sits out every turn.
    ///
    /// With `auto_arrive` set, casts resolve as soon as they are accepted;
    /// otherwise they wait for [`arrived`](Self::arrived).
    pub fn new(mut duel: Duel, policy: Option<Box<dyn AiPolicy>>, auto_arrive: bool) -> Self {
        if policy.is_none() {
            error!("no AI policy configured; AI turns will be skipped");
            duel.exclude_ai();
        }
        let mut session = Self {
            duel,
            policy,
            auto_arrive,
            outbox: Vec::new(),
        };
        session.settle();
        session
    }

    pub fn duel(&self) -> &Duel {
        &self.duel
    }

    pub fn snapshot(&self) -> DuelSnapshot {
        self.duel.snapshot()
    }

    pub fn winner(&self) -> Option<Side> {
        self.duel.winner()
    }

    pub fn is_over(&self) -> bool {
        self.duel.is_over()
    }

    // ========================================================================
    // Player requests
    // ========================================================================

    pub fn select_target(&mut self, target: Option<Target>) {
        self.duel.select_target(Side::Player, target);
    }

    /// Starts a player cast at the selected target.
    ///
    /// Returns the outcome when the cast resolved right away, `None` when it
    /// is waiting for the player to reach engagement range.
    pub fn request_cast(&mut self, spell: SpellId) -> Result<Option<CastOutcome>, CastError> {
        let result = match self.duel.request_cast(Side::Player, spell) {
            Ok(_) if self.auto_arrive => Ok(self.duel.resolve_cast(Side::Player)),
            Ok(pending) => {
                debug!(?pending, "player cast pending");
                Ok(None)
            }
            Err(err) => {
                warn!(%err, code = err.error_code(), %spell, "player cast rejected");
                Err(err)
            }
        };
        self.settle();
        result
    }

    /// Movement signal: resolves `side`'s pending cast, if any.
    pub fn arrived(&mut self, side: Side) -> Option<CastOutcome> {
        let outcome = self.duel.on_arrived_at_engagement_range(side);
        if outcome.is_none() {
            debug!(%side, "arrival with nothing pending");
        }
        self.settle();
        outcome
    }

    pub fn unlock_skill(&mut self, spell: SpellId) -> Result<SkillUnlock, UnlockError> {
        let result = self.duel.unlock_skill(Side::Player, spell);
        if let Err(err) = &result {
            warn!(%err, code = err.error_code(), %spell, "skill unlock rejected");
        }
        self.settle();
        result
    }

    pub fn buy_item(&mut self, item: ItemKind) -> Result<u32, PurchaseError> {
        let result = self.duel.buy_item(Side::Player, item);
        if let Err(err) = &result {
            warn!(%err, code = err.error_code(), %item, "purchase rejected");
        }
        self.settle();
        result
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Advances the match by `dt` and lets the AI act on any due signal.
    pub fn tick(&mut self, dt: Duration) -> Vec<TurnSignal> {
        let signals = self.duel.advance(dt);
        for signal in &signals {
            match signal {
                TurnSignal::AiTurnStarted => {
                    debug!("AI turn started");
                    self.spend_ai_skill_points();
                }
                TurnSignal::AiActionDue => self.run_ai_action(),
                other => debug!(signal = ?other, "turn transition"),
            }
        }
        self.settle();
        signals
    }

    /// Events produced since the last call, in emission order.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    // ========================================================================
    // AI
    // ========================================================================

    fn run_ai_action(&mut self) {
        let Some(policy) = self.policy.as_mut() else {
            return;
        };
        let decision = policy.decide(&self.duel);
        debug!(?decision, "AI decided");

        let accepted = match decision {
            AiDecision::Cast { spell, target } => match self.ai_cast(spell, target) {
                Ok(_) => true,
                Err(err) => {
                    warn!(%err, code = err.error_code(), %spell, "AI cast rejected");
                    false
                }
            },
            AiDecision::BuyItem(item) => match self.duel.buy_item(Side::Ai, item) {
                Ok(health) => {
                    debug!(%item, health, "AI bought item");
                    true
                }
                Err(err) => {
                    warn!(%err, code = err.error_code(), %item, "AI purchase rejected");
                    false
                }
            },
        };
        if accepted {
            return;
        }

        if let Err(err) = self.ai_cast(GameConfig::DEFAULT_ACTION, Target::Opponent) {
            warn!(%err, "AI fallback attack rejected, forfeiting action");
            self.duel.forfeit_action(Side::Ai);
        }
    }

    fn ai_cast(&mut self, spell: SpellId, target: Target) -> Result<(), CastError> {
        self.duel.begin_cast(Side::Ai, spell, Some(target))?;
        if self.auto_arrive {
            if let Some(outcome) = self.duel.resolve_cast(Side::Ai) {
                debug!(?outcome, "AI cast resolved");
            }
        }
        Ok(())
    }

    /// Spends AI skill points until the policy passes or points run out.
    fn spend_ai_skill_points(&mut self) {
        let Some(policy) = self.policy.as_mut() else {
            return;
        };
        while self.duel.combatant(Side::Ai).ledger.skill_points() > 0 {
            let Some(spell) = policy.next_skill(&self.duel) else {
                break;
            };
            match self.duel.unlock_skill(Side::Ai, spell) {
                Ok(unlock) => debug!(spell = %unlock.spell, level = unlock.level, "AI skill bought"),
                Err(err) => {
                    warn!(%err, code = err.error_code(), %spell, "AI skill purchase rejected");
                    break;
                }
            }
        }
    }

    /// Moves queued events into the outbox. An AI level-up spends the new
    /// points right away, which may queue more events.
    fn settle(&mut self) {
        loop {
            let events = self.duel.drain_events();
            if events.is_empty() {
                return;
            }

            let mut ai_leveled = false;
            for event in &events {
                match event {
                    GameEvent::LevelUp {
                        side: Side::Ai,
                        reason: LevelUpReason::LevelGained,
                        level,
                        ..
                    } => {
                        debug!(level, "AI levelled up");
                        ai_leveled = true;
                    }
                    GameEvent::MatchOver { winner_is_player } => {
                        info!(winner_is_player, "match over");
                    }
                    _ => {}
                }
            }
            self.outbox.extend(events);

            if ai_leveled && !self.duel.is_over() {
                self.spend_ai_skill_points();
            }
        }
    }
}
