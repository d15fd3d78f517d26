//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for the
//! player's requests or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{CastOutcome, DuelSnapshot, ItemKind, Side, SkillUnlock, SpellId, Target};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends a command and waits for the worker's reply.
    async fn call<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Select (or clear) the player's target for the next cast
    pub async fn select_target(&self, target: Option<Target>) -> Result<()> {
        self.call(|reply| Command::SelectTarget { target, reply })
            .await
    }

    /// Cast `spell` at the player's selected target
    ///
    /// Returns the outcome when the cast resolved immediately, or `None` when
    /// it waits for [`on_arrived_at_engagement_range`](Self::on_arrived_at_engagement_range).
    pub async fn request_cast(&self, spell: SpellId) -> Result<Option<CastOutcome>> {
        Ok(self
            .call(|reply| Command::RequestCast { spell, reply })
            .await??)
    }

    /// Report that `side` reached its target, resolving its pending cast
    pub async fn on_arrived_at_engagement_range(&self, side: Side) -> Result<Option<CastOutcome>> {
        self.call(|reply| Command::Arrived { side, reply }).await
    }

    /// Spend a skill point to unlock or upgrade `spell` for the player
    pub async fn unlock_skill(&self, spell: SpellId) -> Result<SkillUnlock> {
        Ok(self
            .call(|reply| Command::UnlockSkill { spell, reply })
            .await??)
    }

    /// Buy and use `item`; returns the player's health afterwards
    pub async fn buy_item(&self, item: ItemKind) -> Result<u32> {
        Ok(self.call(|reply| Command::BuyItem { item, reply }).await??)
    }

    /// Query the current match state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<DuelSnapshot> {
        self.call(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Hits, counterattacks, refused casts, defeats
    /// - `Topic::Progression` - Rewards, level-ups, skills, purchases
    /// - `Topic::Turn` - Turn starts and match over
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut turns = handle.subscribe(Topic::Turn);
    /// while let Ok(event) = turns.recv().await {
    ///     // Handle turn events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
