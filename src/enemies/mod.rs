//! Enemy data and AI.
//!
//! ## Key Types
//!
//! - `EnemyDefinition`: Static stats, move lists, phases and thresholds
//! - `IntentKind`: What a move does (tagged union with an unrecognized fallback)
//! - `EnemyCatalog`: Definition lookup for the roster and summons
//! - `Intent`: A telegraphed next action
//!
//! ## Selection
//!
//! `select_intent` performs the weighted roll over eligible moves;
//! `advance_phase` promotes multi-phase enemies as their health drops.

pub mod catalog;
pub mod definition;
pub mod intent;
pub mod phase;

pub use catalog::EnemyCatalog;
pub use definition::{
    EnemyDefinition, EnemyMove, EnemyPhase, EnemyRank, EnemyTypeId, IntentKind, MoveId,
};
pub use intent::{eligible_moves, select_intent, Intent};
pub use phase::{advance_phase, phase_for_fraction, PhaseChange};
