//! Topic-based event bus implementation.

use std::collections::HashMap;

use game_core::GameEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Hits, counterattacks, refused casts, defeats and respawns
    Combat,
    /// XP, levels, skills, gold and resource changes
    Progression,
    /// Turn starts and the end of the match
    Turn,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Combat, Topic::Progression, Topic::Turn];

    /// Topic a game event is published on.
    pub fn of(event: &GameEvent) -> Self {
        match event {
            GameEvent::DamageDealt { .. }
            | GameEvent::CounterAttack { .. }
            | GameEvent::NoResourceForAction { .. }
            | GameEvent::ActorDefeated { .. }
            | GameEvent::NpcRespawned { .. } => Topic::Combat,
            GameEvent::LevelUp { .. }
            | GameEvent::SkillUnlocked { .. }
            | GameEvent::RewardsGranted { .. }
            | GameEvent::ResourceRegenerated { .. }
            | GameEvent::ItemPurchased { .. } => Topic::Progression,
            GameEvent::TurnStarted { .. } | GameEvent::MatchOver { .. } => Topic::Turn,
        }
    }
}

/// Event wrapper that carries the topic and the game event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Combat(GameEvent),
    Progression(GameEvent),
    Turn(GameEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Progression(_) => Topic::Progression,
            Event::Turn(_) => Topic::Turn,
        }
    }

    pub fn game_event(&self) -> &GameEvent {
        match self {
            Event::Combat(event) | Event::Progression(event) | Event::Turn(event) => event,
        }
    }

    pub fn into_game_event(self) -> GameEvent {
        match self {
            Event::Combat(event) | Event::Progression(event) | Event::Turn(event) => event,
        }
    }
}

impl From<GameEvent> for Event {
    fn from(event: GameEvent) -> Self {
        match Topic::of(&event) {
            Topic::Combat => Event::Combat(event),
            Topic::Progression => Event::Progression(event),
            Topic::Turn => Event::Turn(event),
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front, one per topic.
#[derive(Clone)]
pub struct EventBus {
    combat: broadcast::Sender<Event>,
    progression: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            combat: broadcast::channel(capacity).0,
            progression: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Progression => &self.progression,
            Topic::Turn => &self.turn,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();

        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
