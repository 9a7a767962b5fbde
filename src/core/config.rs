//! Combat configuration.
//!
//! Encounters configure the engine at construction time. Numeric rules that
//! differ between game modes (hand size, fallback intent, status multipliers)
//! live here rather than being hardcoded in the turn controller.

use serde::{Deserialize, Serialize};

/// Complete combat configuration.
///
/// ## Example
///
/// ```
/// use deck_combat::core::CombatConfig;
///
/// let config = CombatConfig::new()
///     .with_draw_per_turn(6)
///     .with_fallback_attack(3);
///
/// assert_eq!(config.draw_per_turn, 6);
/// assert_eq!(config.max_hand_size, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Cards drawn at the start of every player turn.
    pub draw_per_turn: usize,

    /// Cards beyond this hand size go straight to the discard pile.
    pub max_hand_size: usize,

    /// Damage of the intent used when an enemy has no eligible move.
    pub fallback_attack: i32,

    /// Maximum number of minions the player may control.
    pub max_minions: usize,

    /// Outgoing damage percentage while weak.
    pub weak_percent: i32,

    /// Incoming damage percentage while vulnerable.
    pub vulnerable_percent: i32,

    /// Block gain percentage while frail.
    pub frail_percent: i32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            draw_per_turn: 5,
            max_hand_size: 10,
            fallback_attack: 5,
            max_minions: 5,
            weak_percent: 75,
            vulnerable_percent: 150,
            frail_percent: 75,
        }
    }
}

impl CombatConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of cards drawn per turn.
    #[must_use]
    pub fn with_draw_per_turn(mut self, count: usize) -> Self {
        self.draw_per_turn = count;
        self
    }

    /// Set the maximum hand size.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the fallback intent damage.
    #[must_use]
    pub fn with_fallback_attack(mut self, damage: i32) -> Self {
        self.fallback_attack = damage;
        self
    }

    /// Set the minion cap.
    #[must_use]
    pub fn with_max_minions(mut self, max: usize) -> Self {
        self.max_minions = max;
        self
    }

    /// Set the weak/vulnerable/frail percentages.
    #[must_use]
    pub fn with_status_percents(mut self, weak: i32, vulnerable: i32, frail: i32) -> Self {
        self.weak_percent = weak;
        self.vulnerable_percent = vulnerable;
        self.frail_percent = frail;
        self
    }

    /// Scale `value` by a percentage, flooring toward zero.
    #[must_use]
    pub fn scale(value: i32, percent: i32) -> i32 {
        (value * percent) / 100
    }
}
