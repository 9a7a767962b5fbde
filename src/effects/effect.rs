//! Effect definitions.
//!
//! Effects are the atomic building blocks of cards. A card lists its
//! effects in order and the interpreter applies them one by one against an
//! optional target enemy.
//!
//! ## Damage and Defense
//!
//! - `Damage`, `DamageAll`, `MultiHit`: attacks through the damage pipeline
//! - `Block`: player block, reduced while frail
//! - `DamagePerResource`, `BlockPerResource`: scale with a class resource
//!
//! ## Health and Flow
//!
//! - `Heal`, `LoseHealth`
//! - `Draw`, `GainResolve`
//!
//! ## Ledger
//!
//! - `GainResource`, `ApplyStatus`, `TakeVow`
//!
//! ## Class Mechanics
//!
//! - `Whimsy`: weighted random outcome, lucky outcomes favoured by luck
//! - `SummonMinion`: a player ally that strikes at end of turn
//! - `Fracture`: permanently remove random cards from a pile
//!
//! Unknown `kind` tags in catalog data deserialize to `Unrecognized`, which
//! the interpreter treats as a no-op.

use serde::{Deserialize, Serialize};

use super::targeting::StatusTarget;
use crate::ledger::{ResourceKind, StatusKind, VowRestriction};
use crate::zones::PileKind;

/// An atomic card effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Attack the target.
    Damage { amount: i32 },

    /// Attack every targetable enemy.
    DamageAll { amount: i32 },

    /// Attack the target `hits` times, stopping once it dies.
    MultiHit { amount: i32, hits: u32 },

    /// Gain block.
    Block { amount: i32 },

    /// Restore health. Always grants one devotion.
    Heal { amount: i32 },

    /// Lose health, ignoring block.
    LoseHealth { amount: i32 },

    /// Draw cards.
    Draw { count: usize },

    /// Gain resolve this turn (may exceed the maximum).
    GainResolve { amount: i32 },

    /// Add to a class resource.
    GainResource { resource: ResourceKind, amount: i32 },

    /// Apply a status.
    ApplyStatus {
        target: StatusTarget,
        status: StatusKind,
        amount: i32,
        #[serde(default)]
        duration: Option<u32>,
    },

    /// Attack the target for `per` damage per stack of a resource.
    DamagePerResource {
        resource: ResourceKind,
        per: i32,
        #[serde(default)]
        consume: bool,
    },

    /// Gain `per` block per stack of a resource.
    BlockPerResource {
        resource: ResourceKind,
        per: i32,
        #[serde(default)]
        consume: bool,
    },

    /// Resolve one weighted random outcome.
    Whimsy { outcomes: Vec<WhimsyOutcome> },

    /// Swear a vow: bonus attack damage paired with a restriction.
    TakeVow {
        bonus: i32,
        restriction: VowRestriction,
        turns: u32,
    },

    /// Summon a player minion.
    SummonMinion { attack: i32 },

    /// Permanently remove random cards from a pile.
    Fracture { pile: PileKind, count: usize },

    #[serde(other)]
    Unrecognized,
}

/// One possible result of a `Whimsy` effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhimsyOutcome {
    pub weight: u32,

    /// Gains the player's luck as extra weight.
    #[serde(default)]
    pub lucky: bool,

    pub effects: Vec<Effect>,
}

impl WhimsyOutcome {
    /// Create an outcome.
    #[must_use]
    pub fn new(weight: u32, effects: Vec<Effect>) -> Self {
        Self {
            weight,
            lucky: false,
            effects,
        }
    }

    /// Mark as lucky (builder pattern).
    #[must_use]
    pub fn lucky(mut self) -> Self {
        self.lucky = true;
        self
    }

    /// Roll weight given the player's luck.
    #[must_use]
    pub fn weight_with_luck(&self, luck: i32) -> u32 {
        if self.lucky {
            self.weight.saturating_add(luck.max(0).unsigned_abs())
        } else {
            self.weight
        }
    }
}

impl Effect {
    /// Check if this effect acts on the chosen target enemy.
    #[must_use]
    pub fn needs_target(&self) -> bool {
        match self {
            Effect::Damage { .. }
            | Effect::MultiHit { .. }
            | Effect::DamagePerResource { .. } => true,
            Effect::ApplyStatus { target, .. } => *target == StatusTarget::Target,
            Effect::Whimsy { outcomes } => outcomes
                .iter()
                .any(|o| o.effects.iter().any(Effect::needs_target)),
            _ => false,
        }
    }
}
