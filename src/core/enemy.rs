//! Enemy combat state.
//!
//! An `Enemy` is one live instance on the roster, created from an
//! `EnemyDefinition`. Enemies are addressed by their roster index; dead
//! enemies stay on the roster at zero health so indices remain stable.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::enemies::{EnemyDefinition, EnemyRank, EnemyTypeId, Intent, MoveId};
use crate::events::DamageBreakdown;
use crate::ledger::{StatusKind, StatusSet};

/// One enemy on the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub type_id: EnemyTypeId,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub block: i32,

    /// Added to the next attack, then cleared.
    pub bonus_damage: i32,

    /// Cannot be targeted until this enemy next acts.
    pub untargetable: bool,

    pub rank: EnemyRank,

    /// Current phase index, never decreasing.
    pub phase: usize,

    /// Once-per-combat moves already resolved.
    pub used_moves: SmallVec<[MoveId; 4]>,

    /// Telegraphed next action.
    pub intent: Option<Intent>,

    pub statuses: StatusSet,
}

impl Enemy {
    /// Create a full-health enemy from its definition.
    #[must_use]
    pub fn from_definition(definition: &EnemyDefinition) -> Self {
        let max_health = definition.max_health.max(1);
        Self {
            type_id: definition.id,
            name: definition.name.clone(),
            health: max_health,
            max_health,
            block: 0,
            bonus_damage: 0,
            untargetable: false,
            rank: definition.rank,
            phase: 0,
            used_moves: SmallVec::new(),
            intent: None,
            statuses: StatusSet::new(),
        }
    }

    /// Check if the enemy is alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Alive and not shrouded.
    #[must_use]
    pub fn is_targetable(&self) -> bool {
        self.is_alive() && !self.untargetable
    }

    /// Current health as a fraction of maximum.
    #[must_use]
    pub fn health_fraction(&self) -> f64 {
        f64::from(self.health) / f64::from(self.max_health)
    }

    /// Health missing from maximum.
    #[must_use]
    pub fn missing_health(&self) -> i32 {
        self.max_health - self.health
    }

    /// Check if a once-per-combat move has been used.
    #[must_use]
    pub fn has_used(&self, id: MoveId) -> bool {
        self.used_moves.contains(&id)
    }

    /// Record a resolved once-per-combat move.
    pub fn record_move(&mut self, id: MoveId) {
        if !self.has_used(id) {
            self.used_moves.push(id);
        }
    }

    /// Current strength.
    #[must_use]
    pub fn strength(&self) -> i32 {
        self.statuses.amount(StatusKind::Strength)
    }

    /// Take damage: block absorbs first, the rest reduces health.
    pub fn absorb(&mut self, damage: i32) -> DamageBreakdown {
        let damage = damage.max(0);
        let blocked = damage.min(self.block);
        self.block -= blocked;
        let hp_damage = (damage - blocked).min(self.health);
        self.health -= hp_damage;

        DamageBreakdown {
            damage,
            blocked,
            hp_damage,
        }
    }

    /// Lose health directly, ignoring block. Returns the health lost.
    pub fn lose_health(&mut self, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.health);
        self.health -= lost;
        lost
    }

    /// Restore health up to the maximum. Returns the health restored.
    pub fn restore_health(&mut self, amount: i32) -> i32 {
        let restored = amount.clamp(0, self.missing_health());
        self.health += restored;
        restored
    }
}
