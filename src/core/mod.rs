//! Core combat types: ids, RNG, configuration, player, enemy, state.
//!
//! These are the building blocks every other module shares. The combat
//! engine owns a `CombatState`; everything else reads or mutates it through
//! the engine.

pub mod config;
pub mod enemy;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use config::CombatConfig;
pub use enemy::Enemy;
pub use entity::{InstanceAllocator, InstanceId};
pub use player::{Minion, Player};
pub use rng::{GameRng, GameRngState};
pub use state::{CombatPhase, CombatState};
