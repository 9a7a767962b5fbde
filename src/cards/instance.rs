//! Card instances - one physical card in a deck.
//!
//! A `CardInstance` pairs a unique `InstanceId` with a shared, immutable
//! `CardDefinition`. Instances are created once per run when a deck is
//! assembled and are never mutated; moving between piles is the only thing
//! that happens to them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, CardType};
use crate::core::entity::InstanceId;

/// A card instance in a deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this instance.
    pub id: InstanceId,

    /// Shared definition.
    pub definition: Arc<CardDefinition>,
}

impl CardInstance {
    /// Create an instance of a definition.
    #[must_use]
    pub fn new(id: InstanceId, definition: Arc<CardDefinition>) -> Self {
        Self { id, definition }
    }

    /// Definition ID.
    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.definition.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Resolve cost.
    #[must_use]
    pub fn cost(&self) -> i32 {
        self.definition.cost
    }

    /// Declared type.
    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.definition.card_type
    }
}

impl std::hash::Hash for CardInstance {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
        self.definition.id.hash(hasher);
    }
}
