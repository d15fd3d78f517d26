//! Async runtime for a player-versus-AI duel.
//!
//! This crate wires the deterministic rules in `game-core` to a clock, an AI
//! policy, and a topic-based event bus. Consumers embed [`Runtime`] to start a
//! match, issue player requests through [`RuntimeHandle`], and subscribe to the
//! events they care about.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] ships the stock AI policy
//! - [`session`] drives one match synchronously; the worker wraps it
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{AiDecision, AiPolicy, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, Topic};
pub use providers::WeightedRandomPolicy;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::MatchSession;
