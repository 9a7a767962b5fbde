//! The turn controller and its command surface.
//!
//! ## Key Types
//!
//! - `CombatEngine`: owns the combat state and runs commands against it
//! - `CombatBuilder`: assembles a player, a roster and a catalog into an engine
//! - `CombatError`: the closed set of recoverable command failures
//! - `PlayReport` / `TurnReport`: structured command results

mod engine;
mod enemy_turn;
pub mod error;
pub mod report;

pub use engine::{CombatBuilder, CombatEngine};
pub use error::{CombatError, Result};
pub use report::{PlayReport, TurnReport};
