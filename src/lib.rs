//! # deck-combat
//!
//! Deterministic combat resolution for a card-driven roguelike encounter.
//!
//! ## Design Principles
//!
//! 1. **Single Owner**: One `CombatEngine` exclusively owns the combat state.
//!    Callers read defensive snapshots and react to published events.
//!
//! 2. **Validate, Then Mutate**: Every command checks legality first. A
//!    returned error means nothing changed and nothing was published.
//!
//! 3. **Data Over Code**: Cards and enemies are serde data. Effect and
//!    intent kinds are tagged unions with an explicit fallback, so unknown
//!    kinds load and resolve as no-ops.
//!
//! ## Architecture
//!
//! - **Reproducible Randomness**: A single seeded ChaCha8 stream drives
//!   shuffles, intent rolls and whimsy outcomes.
//!
//! - **Persistent Data Structures**: Piles and rosters use `im-rs` so
//!   snapshots are O(1) clones.
//!
//! - **Synchronous Events**: Each command queues events while it runs and
//!   publishes them in order before returning.
//!
//! ## Modules
//!
//! - `core`: Instance IDs, player, enemy, combat state, RNG, configuration
//! - `cards`: Card definitions, instances and the card registry
//! - `zones`: Hand, draw, discard and exhaust piles
//! - `ledger`: Statuses, class resources and vows
//! - `effects`: Effect catalog, targeting and the effect interpreter
//! - `enemies`: Enemy definitions, intent selection and phase thresholds
//! - `events`: Combat events and the subscriber bus
//! - `combat`: The turn controller

pub mod core;
pub mod cards;
pub mod zones;
pub mod ledger;
pub mod effects;
pub mod enemies;
pub mod events;
pub mod combat;

// Re-export commonly used types
pub use crate::core::{
    CombatConfig, CombatPhase, CombatState,
    Enemy, Minion, Player,
    GameRng, GameRngState,
    InstanceAllocator, InstanceId,
};

pub use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry, CardType, Price};

pub use crate::zones::{PileKind, Piles};

pub use crate::ledger::{
    ActiveVow, VowRestriction,
    Decay, ResourceKind, ResourceLedger, ResourceRule,
    StatusEffect, StatusKind, StatusSet,
};

pub use crate::effects::{Effect, EffectContext, EffectInterpreter, StatusTarget, WhimsyOutcome};

pub use crate::enemies::{
    EnemyCatalog, EnemyDefinition, EnemyMove, EnemyPhase, EnemyRank, EnemyTypeId,
    Intent, IntentKind, MoveId,
};

pub use crate::events::{
    CombatEvent, DamageBreakdown, EventBus, EventCategory, StatusHolder, SubscriptionId,
};

pub use crate::combat::{CombatBuilder, CombatEngine, CombatError, PlayReport, Result, TurnReport};
