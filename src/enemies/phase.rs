//! Health-threshold phase monitor.
//!
//! After damage to a surviving enemy, its phase becomes the number of
//! thresholds its health fraction has fallen to or below. The phase only
//! ever increases: healing back above a threshold keeps the phase reached.

use serde::{Deserialize, Serialize};

use super::definition::EnemyDefinition;
use crate::core::enemy::Enemy;

/// A phase promotion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub old: usize,
    pub new: usize,
}

/// Number of thresholds at or above `fraction`.
#[must_use]
pub fn phase_for_fraction(thresholds: &[f64], fraction: f64) -> usize {
    thresholds.iter().filter(|&&t| fraction <= t).count()
}

/// Promote an enemy's phase if its health has crossed new thresholds.
///
/// Returns the change on an actual increase.
pub fn advance_phase(enemy: &mut Enemy, definition: &EnemyDefinition) -> Option<PhaseChange> {
    if definition.thresholds.is_empty() || !enemy.is_alive() {
        return None;
    }

    let reached = phase_for_fraction(&definition.thresholds, enemy.health_fraction());
    if reached <= enemy.phase {
        return None;
    }

    let change = PhaseChange {
        old: enemy.phase,
        new: reached,
    };
    enemy.phase = reached;
    Some(change)
}
