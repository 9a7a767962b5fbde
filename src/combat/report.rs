//! Structured results returned by engine commands.
//!
//! Log lines are presentation data built for the player, not diagnostics.

use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;

/// Result of a successful `play_card`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayReport {
    pub card: InstanceId,
    /// One-line summary, e.g. "Played Strike".
    pub message: String,
    pub target: Option<usize>,
    pub log: Vec<String>,
    pub game_over: bool,
}

/// Result of `start`, `end_turn` or `force_discard`.
///
/// Empty when the command had nothing to do.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub log: Vec<String>,
    /// Cards moved by the command (discarded or drawn).
    pub cards: Vec<InstanceId>,
    pub game_over: bool,
}

impl TurnReport {
    /// Check if the command changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty() && self.cards.is_empty()
    }
}
