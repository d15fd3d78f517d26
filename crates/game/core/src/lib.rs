//! Deterministic duel rules shared by the runtime and content loaders.
//!
//! `game-core` defines the canonical rules (spells, progression, turns,
//! combat) and exposes pure APIs with no I/O, clocks or logging. All match
//! state mutation flows through [`engine::Duel`], which reports what changed
//! through its [`events::EventQueue`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod progression;
pub mod spell;
pub mod state;

pub use action::{
    ActorRef, CastError, CastOutcome, ItemKind, PendingCast, PurchaseError, Target,
};
pub use config::{GameConfig, LevelingRules, ShopRules, StartingStats, TurnRules};
pub use engine::{Duel, DuelSnapshot};
pub use error::{ErrorSeverity, GameError};
pub use events::{EventQueue, GameEvent};
pub use progression::{
    LevelUpReason, ProgressionLedger, ProgressionNotice, SkillUnlock, UnlockError,
    prerequisites_met, try_unlock_or_upgrade, unlock_candidates, upgrade_candidates,
};
pub use spell::{CatalogError, SpellCatalog, SpellDefinition, SpellId};
pub use state::{
    ActionEntry, ActionTable, AiStep, Combatant, Npc, NpcId, NpcKind, NpcRoster, NpcState,
    NpcTemplate, NpcTemplates, Position, RespawnScaling, Side, TurnController, TurnPhase,
    TurnSignal,
};
