//! Status/resource ledger: bookkeeping for every persistent numeric track.
//!
//! ## Key Types
//!
//! - `StatusSet`: stacking status effects with per-type merge rules
//! - `ResourceLedger`: class resources with caps and decay rules
//! - `ActiveVow`: the player's bonus/restriction pair
//!
//! The ledger types only do arithmetic and report what changed. Emitting
//! events for those changes is the caller's job.

pub mod resource;
pub mod status;
pub mod vow;

pub use resource::{Decay, ResourceChange, ResourceKind, ResourceLedger, ResourceRule};
pub use status::{MergeRule, StatusChange, StatusEffect, StatusKind, StatusSet};
pub use vow::{ActiveVow, VowRestriction};
