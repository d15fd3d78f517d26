//! Simulation worker that owns the authoritative [`MatchSession`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), advances
//! the match clock on a fixed interval, and publishes every drained
//! [`GameEvent`](game_core::GameEvent) to the [`EventBus`].

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use game_core::{
    CastError, CastOutcome, DuelSnapshot, ItemKind, PurchaseError, Side, SkillUnlock, SpellId,
    Target, UnlockError,
};

use crate::events::EventBus;
use crate::session::MatchSession;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Store the player's target for the next cast.
    SelectTarget {
        target: Option<Target>,
        reply: oneshot::Sender<()>,
    },
    /// Start a player cast at the selected target.
    RequestCast {
        spell: SpellId,
        reply: oneshot::Sender<Result<Option<CastOutcome>, CastError>>,
    },
    /// Movement signal: `side` reached its target.
    Arrived {
        side: Side,
        reply: oneshot::Sender<Option<CastOutcome>>,
    },
    UnlockSkill {
        spell: SpellId,
        reply: oneshot::Sender<Result<SkillUnlock, UnlockError>>,
    },
    BuyItem {
        item: ItemKind,
        reply: oneshot::Sender<Result<u32, PurchaseError>>,
    },
    /// Query the current match state (read-only).
    Snapshot { reply: oneshot::Sender<DuelSnapshot> },
    Shutdown,
}

/// Background task that processes gameplay commands and clock ticks.
pub struct SimulationWorker {
    session: MatchSession,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    outcome_tx: watch::Sender<Option<Side>>,
    tick_interval: Duration,
}

impl SimulationWorker {
    pub fn new(
        session: MatchSession,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        outcome_tx: watch::Sender<Option<Side>>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            session,
            command_rx,
            event_bus,
            outcome_tx,
            tick_interval,
        }
    }

    /// Main worker loop.
    ///
    /// Runs until [`Command::Shutdown`] arrives or every handle is dropped.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        self.publish_events();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                _ = interval.tick() => {
                    let now = Instant::now();
                    self.session.tick(now - last_tick);
                    last_tick = now;
                }
            }
            self.publish_events();
        }

        debug!("simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SelectTarget { target, reply } => {
                self.session.select_target(target);
                if reply.send(()).is_err() {
                    debug!("SelectTarget reply channel closed (caller dropped)");
                }
            }
            Command::RequestCast { spell, reply } => {
                let result = self.session.request_cast(spell);
                if reply.send(result).is_err() {
                    debug!("RequestCast reply channel closed (caller dropped)");
                }
            }
            Command::Arrived { side, reply } => {
                let outcome = self.session.arrived(side);
                if reply.send(outcome).is_err() {
                    debug!("Arrived reply channel closed (caller dropped)");
                }
            }
            Command::UnlockSkill { spell, reply } => {
                let result = self.session.unlock_skill(spell);
                if reply.send(result).is_err() {
                    debug!("UnlockSkill reply channel closed (caller dropped)");
                }
            }
            Command::BuyItem { item, reply } => {
                let result = self.session.buy_item(item);
                if reply.send(result).is_err() {
                    debug!("BuyItem reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.session.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => {}
        }
    }

    fn publish_events(&mut self) {
        for event in self.session.take_events() {
            self.event_bus.publish(event);
        }

        if let Some(winner) = self.session.winner() {
            if self.outcome_tx.borrow().is_none() {
                info!(%winner, "publishing match outcome");
                self.outcome_tx.send_replace(Some(winner));
            }
        }
    }
}
