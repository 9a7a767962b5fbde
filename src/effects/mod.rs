//! Effect system for card abilities.
//!
//! ## Key Types
//!
//! - `Effect`: Atomic card effects (tagged union with an unrecognized fallback)
//! - `StatusTarget`: Who a status effect lands on
//! - `EffectContext`: Borrowed combat state plus queued events and log lines
//! - `EffectInterpreter`: Applies effects through the context

pub mod context;
pub mod effect;
pub mod interpreter;
pub mod targeting;

pub use context::{EffectContext, Outcome};
pub use effect::{Effect, WhimsyOutcome};
pub use interpreter::EffectInterpreter;
pub use targeting::{
    most_damaged_ally, random_ally, random_targetable, resolve_card_target, StatusTarget,
};
