//! Recoverable command failures.
//!
//! Every failure leaves the combat state untouched and publishes no events,
//! so callers can simply re-prompt.

use thiserror::Error;

use crate::core::state::CombatPhase;

pub type Result<T> = std::result::Result<T, CombatError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("action not allowed during the {phase} phase")]
    InvalidPhase { phase: CombatPhase },

    #[error("no playable card at hand index {index}")]
    InvalidCard { index: usize },

    #[error("card costs {cost} resolve but only {available} is available")]
    InsufficientResolve { cost: i32, available: i32 },

    #[error("invalid target {index:?}")]
    InvalidTarget { index: Option<usize> },
}
