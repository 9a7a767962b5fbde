//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Immutable card template (cost, type, effects, flags)
//! - `CardInstance`: One copy of a card in a deck
//! - `CardRegistry`: Catalog lookup and deck assembly from recipes

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardType, Price};
pub use instance::CardInstance;
pub use registry::CardRegistry;
