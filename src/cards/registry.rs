//! Card registry for definition lookup and deck assembly.
//!
//! The `CardRegistry` stores the card catalog. Decks are assembled from a
//! recipe (card ID plus copy count) once per run; each copy becomes a new
//! `CardInstance` sharing the registered definition.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardType};
use super::instance::CardInstance;
use crate::core::entity::InstanceAllocator;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use deck_combat::cards::{CardDefinition, CardId, CardRegistry, CardType};
/// use deck_combat::core::InstanceAllocator;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Strike", CardType::Attack, 1));
///
/// let mut ids = InstanceAllocator::new();
/// let deck = registry.build_deck(&[(CardId::new(1), 5)], &mut ids);
/// assert_eq!(deck.len(), 5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Returns the previous definition with the same ID, if any.
    pub fn register(&mut self, card: CardDefinition) -> Option<Arc<CardDefinition>> {
        self.cards.insert(card.id, Arc::new(card))
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Arc<CardDefinition>> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values().filter(move |c| c.card_type == card_type)
    }

    /// Create one instance of a registered card.
    pub fn instantiate(&self, id: CardId, ids: &mut InstanceAllocator) -> Option<CardInstance> {
        let definition = self.cards.get(&id)?;
        Some(CardInstance::new(ids.next_id(), Arc::clone(definition)))
    }

    /// Assemble a deck from a recipe of `(card, copies)` pairs.
    ///
    /// Instances are created in recipe order. Unknown card IDs are skipped.
    pub fn build_deck(
        &self,
        recipe: &[(CardId, usize)],
        ids: &mut InstanceAllocator,
    ) -> Vec<CardInstance> {
        let mut deck = Vec::new();

        for &(card_id, copies) in recipe {
            if !self.contains(card_id) {
                tracing::warn!("deck recipe references unknown {}", card_id);
                continue;
            }
            for _ in 0..copies {
                if let Some(instance) = self.instantiate(card_id, ids) {
                    deck.push(instance);
                }
            }
        }

        deck
    }
}
