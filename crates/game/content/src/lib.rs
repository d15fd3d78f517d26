//! Data-driven content definitions and loaders.
//!
//! This crate houses the stock duel content and provides loaders for RON/TOML data files:
//! - Spell table (data-driven via RON)
//! - NPC templates (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Loaded content is validated here and handed to `game-core` constructors;
//! it never changes during a match.
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, GameContent, NpcLoader, SpellLoader};
