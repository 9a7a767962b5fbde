//! Combat event types.
//!
//! Every state change the engine makes is announced as a `CombatEvent`.
//! Payloads are plain owned data; subscribers receive them by shared
//! reference and have no handle on the engine.

use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;
use crate::core::state::CombatPhase;
use crate::enemies::{EnemyTypeId, Intent};
use crate::ledger::{ActiveVow, ResourceKind, StatusKind};
use crate::zones::PileKind;

/// How one hit was absorbed.
///
/// `blocked + hp_damage == damage` unless the hit exceeded everything the
/// holder had left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub damage: i32,
    pub blocked: i32,
    pub hp_damage: i32,
}

/// Who holds a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusHolder {
    Player,
    Enemy(usize),
}

/// Groups of events for filtered subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Phase, resolve and game over.
    Flow,
    /// Card movement.
    Cards,
    /// Damage, block and healing.
    Combat,
    /// Statuses, resources, vows and minions.
    Ledger,
    /// Intents, summons, deaths and enemy phases.
    Enemy,
}

/// A combat state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    PhaseChanged {
        from: CombatPhase,
        to: CombatPhase,
    },
    /// Published on every turn-start refill, otherwise only on a change.
    ResolveChanged {
        old: i32,
        new: i32,
        max: i32,
    },
    CardDrawn {
        card: InstanceId,
        name: String,
        destination: PileKind,
    },
    DeckReshuffled {
        cards: usize,
    },
    CardPlayed {
        card: InstanceId,
        name: String,
        cost: i32,
        target: Option<usize>,
    },
    CardDiscarded {
        card: InstanceId,
    },
    CardExhausted {
        card: InstanceId,
    },
    CardFractured {
        card: InstanceId,
        from: PileKind,
    },
    PlayerBlockChanged {
        old: i32,
        new: i32,
    },
    EnemyBlockChanged {
        enemy: usize,
        old: i32,
        new: i32,
    },
    PlayerDamaged {
        breakdown: DamageBreakdown,
        health: i32,
    },
    EnemyDamaged {
        enemy: usize,
        breakdown: DamageBreakdown,
        health: i32,
    },
    PlayerHealed {
        amount: i32,
        health: i32,
    },
    EnemyHealed {
        enemy: usize,
        amount: i32,
        health: i32,
    },
    ResourceChanged {
        kind: ResourceKind,
        old: i32,
        new: i32,
    },
    /// `amount` is 0 when the status was removed.
    StatusChanged {
        holder: StatusHolder,
        status: StatusKind,
        amount: i32,
        duration: Option<u32>,
    },
    VowChanged {
        vow: Option<ActiveVow>,
    },
    MinionSummoned {
        attack: i32,
        count: usize,
    },
    IntentSet {
        enemy: usize,
        intent: Intent,
    },
    EnemySummoned {
        enemy: usize,
        type_id: EnemyTypeId,
    },
    EnemyDied {
        enemy: usize,
    },
    EnemyPhaseChanged {
        enemy: usize,
        old: usize,
        new: usize,
    },
    GameOver {
        victory: bool,
    },
}

impl CombatEvent {
    /// Category used for filtered subscriptions.
    #[must_use]
    pub fn category(&self) -> EventCategory {
        match self {
            CombatEvent::PhaseChanged { .. }
            | CombatEvent::ResolveChanged { .. }
            | CombatEvent::GameOver { .. } => EventCategory::Flow,
            CombatEvent::CardDrawn { .. }
            | CombatEvent::DeckReshuffled { .. }
            | CombatEvent::CardPlayed { .. }
            | CombatEvent::CardDiscarded { .. }
            | CombatEvent::CardExhausted { .. }
            | CombatEvent::CardFractured { .. } => EventCategory::Cards,
            CombatEvent::PlayerBlockChanged { .. }
            | CombatEvent::EnemyBlockChanged { .. }
            | CombatEvent::PlayerDamaged { .. }
            | CombatEvent::EnemyDamaged { .. }
            | CombatEvent::PlayerHealed { .. }
            | CombatEvent::EnemyHealed { .. } => EventCategory::Combat,
            CombatEvent::ResourceChanged { .. }
            | CombatEvent::StatusChanged { .. }
            | CombatEvent::VowChanged { .. }
            | CombatEvent::MinionSummoned { .. } => EventCategory::Ledger,
            CombatEvent::IntentSet { .. }
            | CombatEvent::EnemySummoned { .. }
            | CombatEvent::EnemyDied { .. }
            | CombatEvent::EnemyPhaseChanged { .. } => EventCategory::Enemy,
        }
    }
}
