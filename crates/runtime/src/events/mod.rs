//! Topic-based event bus for runtime events.
//!
//! This module provides a flexible event system where events are published to
//! specific topics, and consumers can subscribe only to the topics they need.
//! Payloads are the [`game_core::GameEvent`]s drained from the duel.

mod bus;

pub use bus::{Event, EventBus, Topic};
