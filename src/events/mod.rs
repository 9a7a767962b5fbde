//! Combat events and the event bus.
//!
//! ## Key Types
//!
//! - `CombatEvent`: Every observable state change
//! - `EventCategory`: Coarse grouping for filtered subscriptions
//! - `EventBus`: Synchronous, ordered delivery to closure subscribers
//! - `DamageBreakdown`: Damage/blocked/health split of one hit

pub mod bus;
pub mod event;

pub use bus::{EventBus, EventHandler, SubscriptionId};
pub use event::{CombatEvent, DamageBreakdown, EventCategory, StatusHolder};
