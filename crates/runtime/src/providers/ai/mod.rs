//! Weighted-random AI opponent.
//!
//! Decisions are made in two small steps:
//!
//! 1. **Intent**: flip a coin between attacking and buying a potion. A
//!    purchase the AI cannot afford falls back to an attack.
//! 2. **Attack shape**: draw a target from [`TargetWeights`] (keyed on how far
//!    the mini boss out-levels the AI), then cast the most damaging action the
//!    AI can currently pay for.
//!
//! Skill points are spent by [`skills::pick_skill`]: new unlocks first, then
//! upgrades, uniformly at random within each group.

pub mod policy;
pub mod skills;
pub mod targeting;

pub use policy::WeightedRandomPolicy;
pub use targeting::TargetWeights;
