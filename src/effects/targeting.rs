//! Target selection.
//!
//! - `StatusTarget`: who a status effect lands on
//! - Card target validation for `play_card`
//! - Random and heuristic picks used by minions and enemy intents

use serde::{Deserialize, Serialize};

use crate::cards::CardDefinition;
use crate::combat::error::{CombatError, Result};
use crate::core::rng::GameRng;
use crate::core::state::CombatState;

/// Recipient of an `ApplyStatus` effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTarget {
    Player,
    /// The enemy the card was played against.
    Target,
    AllEnemies,
}

/// Resolve the enemy a card will be played against.
///
/// Attack cards require a living, targetable enemy. Other cards keep a
/// valid requested target; when they have targeted effects and no valid
/// target was given, they use the first targetable enemy.
pub fn resolve_card_target(
    state: &CombatState,
    card: &CardDefinition,
    requested: Option<usize>,
) -> Result<Option<usize>> {
    if card.requires_target() {
        return match requested {
            Some(index) if state.is_valid_target(index) => Ok(Some(index)),
            _ => Err(CombatError::InvalidTarget { index: requested }),
        };
    }

    if let Some(index) = requested.filter(|&i| state.is_valid_target(i)) {
        return Ok(Some(index));
    }

    if card.effects.iter().any(|e| e.needs_target()) {
        return Ok(state.targetable_enemies().first().copied());
    }

    Ok(None)
}

/// A random living, targetable enemy.
pub fn random_targetable(state: &CombatState, rng: &mut GameRng) -> Option<usize> {
    let targets = state.targetable_enemies();
    rng.choose_index(targets.len()).map(|i| targets[i])
}

/// A random living ally of `actor`, excluding itself.
pub fn random_ally(state: &CombatState, actor: usize, rng: &mut GameRng) -> Option<usize> {
    let allies: Vec<usize> = state
        .living_enemies()
        .into_iter()
        .filter(|&i| i != actor)
        .collect();
    rng.choose_index(allies.len()).map(|i| allies[i])
}

/// The living ally of `actor` missing the most health, or `actor` itself
/// when no ally is damaged.
///
/// Ties go to the lowest roster index.
#[must_use]
pub fn most_damaged_ally(state: &CombatState, actor: usize) -> usize {
    let mut best = actor;
    let mut best_missing = 0;

    for index in state.living_enemies() {
        if index == actor {
            continue;
        }
        let missing = state.enemies[index].missing_health();
        if missing > best_missing {
            best = index;
            best_missing = missing;
        }
    }

    best
}
