//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a match.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use game_content::GameContent;
use game_core::{Duel, GameConfig, NpcTemplates, Side, SpellCatalog};

use crate::api::{AiPolicy, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::providers::WeightedRandomPolicy;
use crate::session::MatchSession;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// How often the worker advances the match clock.
    pub tick_interval: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Resolve casts as soon as they are accepted instead of waiting for an
    /// engagement-range signal.
    pub auto_arrive: bool,
    /// Seed for the stock AI; `None` seeds from the OS.
    pub ai_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            tick_interval: Duration::from_millis(50),
            event_buffer_size: 100,
            command_buffer_size: 32,
            auto_arrive: true,
            ai_seed: None,
        }
    }
}

/// Main runtime that drives a single match
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    outcome_rx: watch::Receiver<Option<Side>>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Winner of the match, if it has ended
    pub fn winner(&self) -> Option<Side> {
        *self.outcome_rx.borrow()
    }

    /// Wait until the match is over and return the winner
    pub async fn wait_for_winner(&mut self) -> Result<Side> {
        let outcome = self
            .outcome_rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| RuntimeError::OutcomeUnavailable)?;
        (*outcome).ok_or(RuntimeError::OutcomeUnavailable)
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone; joining below reports the real failure.
        let _ = self.handle.shutdown().await;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Arc<SpellCatalog>>,
    npcs: NpcTemplates,
    ai_policy: Option<Box<dyn AiPolicy>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            npcs: NpcTemplates::default(),
            ai_policy: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use loaded content: rules, spell catalog and NPC templates
    pub fn content(mut self, content: GameContent) -> Self {
        self.config.game_config = content.config;
        self.catalog = Some(content.catalog);
        self.npcs = content.npcs;
        self
    }

    /// Set the required spell catalog
    pub fn catalog(mut self, catalog: Arc<SpellCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Override the NPC templates (defaults to the stock mob and mini boss)
    pub fn npcs(mut self, npcs: NpcTemplates) -> Self {
        self.npcs = npcs;
        self
    }

    /// Set the AI policy
    ///
    /// Without one the AI never acts and its turns are skipped.
    pub fn ai_policy(mut self, policy: impl AiPolicy + 'static) -> Self {
        self.ai_policy = Some(Box::new(policy));
        self
    }

    /// Use the stock [`WeightedRandomPolicy`], seeded from
    /// [`RuntimeConfig::ai_seed`] when set
    pub fn weighted_ai(mut self) -> Self {
        let policy = match self.config.ai_seed {
            Some(seed) => WeightedRandomPolicy::new(seed),
            None => WeightedRandomPolicy::from_entropy(),
        };
        self.ai_policy = Some(Box::new(policy));
        self
    }

    /// Build the runtime and start the simulation worker
    pub async fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;

        let duel = Duel::new(self.config.game_config.clone(), catalog, &self.npcs);
        let session = MatchSession::new(duel, self.ai_policy, self.config.auto_arrive);

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (outcome_tx, outcome_rx) = watch::channel(None);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            session,
            command_rx,
            event_bus,
            outcome_tx,
            self.config.tick_interval,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            outcome_rx,
            sim_worker_handle,
        })
    }
}
