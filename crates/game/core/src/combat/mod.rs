//! Combat formulas.
//!
//! Pure functions only; applying damage to combatants and NPCs is done by
//! [`Duel`](crate::engine::Duel).

mod counter;

pub use counter::counter_damage;
