//! Player combat state.
//!
//! ## Player
//!
//! Health, block, resolve, the four card piles, stacking statuses, the
//! class resource ledger, an optional vow and any summoned minions.
//!
//! All health/block/resolve mutation goes through methods that clamp, so
//! health stays in `0..=max_health` and block never goes negative.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::ledger::{ActiveVow, ResourceKind, ResourceLedger, ResourceRule, StatusKind, StatusSet};
use crate::zones::Piles;

/// A player-controlled ally that strikes at end of turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minion {
    pub attack: i32,
}

/// The player side of a combat.
///
/// ## Example
///
/// ```
/// use deck_combat::core::Player;
/// use deck_combat::ledger::{ResourceKind, ResourceRule};
///
/// let player = Player::new(80, 3, Vec::new())
///     .with_resource_rule(ResourceKind::Luck, ResourceRule::capped(5))
///     .with_resource(ResourceKind::Luck, 2);
///
/// assert_eq!(player.health, 80);
/// assert_eq!(player.resources.get(ResourceKind::Luck), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub health: i32,
    pub max_health: i32,
    pub block: i32,
    pub resolve: i32,
    pub max_resolve: i32,
    pub piles: Piles,
    pub statuses: StatusSet,
    pub resources: ResourceLedger,
    pub vow: Option<ActiveVow>,
    pub minions: Vector<Minion>,
}

impl Player {
    /// Create a player at full health with the deck in the draw pile.
    #[must_use]
    pub fn new(max_health: i32, max_resolve: i32, deck: Vec<CardInstance>) -> Self {
        let max_health = max_health.max(1);
        Self {
            health: max_health,
            max_health,
            block: 0,
            resolve: 0,
            max_resolve: max_resolve.max(0),
            piles: Piles::new(deck),
            statuses: StatusSet::new(),
            resources: ResourceLedger::new(),
            vow: None,
            minions: Vector::new(),
        }
    }

    /// Start below maximum health (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.clamp(0, self.max_health);
        self
    }

    /// Register a resource rule (builder pattern).
    #[must_use]
    pub fn with_resource_rule(mut self, kind: ResourceKind, rule: ResourceRule) -> Self {
        self.resources.set_rule(kind, rule);
        self
    }

    /// Set a starting resource value (builder pattern).
    #[must_use]
    pub fn with_resource(mut self, kind: ResourceKind, value: i32) -> Self {
        self.resources.set(kind, value);
        self
    }

    /// Check if the player has been defeated.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Lose health directly, ignoring block. Returns the health lost.
    pub fn lose_health(&mut self, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.health);
        self.health -= lost;
        lost
    }

    /// Restore health up to the maximum. Returns the health restored.
    pub fn restore_health(&mut self, amount: i32) -> i32 {
        let restored = amount.clamp(0, self.max_health - self.health);
        self.health += restored;
        restored
    }

    /// Add block. Returns the new block value.
    pub fn add_block(&mut self, amount: i32) -> i32 {
        self.block = (self.block + amount.max(0)).max(0);
        self.block
    }

    /// Current strength.
    #[must_use]
    pub fn strength(&self) -> i32 {
        self.statuses.amount(StatusKind::Strength)
    }

    /// Active vow bonus damage (0 without a vow).
    #[must_use]
    pub fn vow_bonus(&self) -> i32 {
        self.vow.map_or(0, |v| v.bonus)
    }
}
