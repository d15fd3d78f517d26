//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the match session and is the only task that
//! touches game state.

mod simulation;

pub use simulation::{Command, SimulationWorker};
