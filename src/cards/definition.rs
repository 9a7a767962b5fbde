//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable template of a card: its cost, type,
//! ordered effect list and flags. Definitions are external catalog data and
//! are never mutated during combat; effects read the definition together
//! with the current combat state.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;

/// Unique identifier for a card definition.
///
/// This identifies the "kind" of card (e.g., "Smite"), not a specific
/// instance in a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Declared card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    /// Requires a living, targetable enemy.
    Attack,
    Skill,
    Power,
    Curse,
}

/// The recurring cost of a priced card.
///
/// Playing the card applies `Debt`: the player loses `health` at the start
/// of each of the next `turns` turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub health: i32,
    pub turns: u32,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use deck_combat::cards::{CardDefinition, CardId, CardType};
/// use deck_combat::effects::Effect;
///
/// let strike = CardDefinition::new(CardId::new(1), "Strike", CardType::Attack, 1)
///     .with_effect(Effect::Damage { amount: 6 });
///
/// assert!(strike.is_playable());
/// assert!(strike.requires_target());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/logs).
    pub name: String,

    /// Resolve required to play. Negative marks the card unplayable.
    pub cost: i32,

    /// Declared type.
    pub card_type: CardType,

    /// Effects applied in order when played.
    #[serde(default)]
    pub effects: Vec<Effect>,

    /// Goes to the exhaust pile instead of the discard pile.
    #[serde(default)]
    pub exhaust: bool,

    /// Effects also resolve at end of turn while the card is in hand.
    #[serde(default)]
    pub end_of_turn: bool,

    /// Only playable while a vow is active.
    #[serde(default)]
    pub requires_vow: bool,

    /// Ongoing recurring cost applied when played.
    #[serde(default)]
    pub price: Option<Price>,
}

impl CardDefinition {
    /// Create a new card definition with no effects or flags.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType, cost: i32) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            card_type,
            effects: Vec::new(),
            exhaust: false,
            end_of_turn: false,
            requires_vow: false,
            price: None,
        }
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Mark as exhausting (builder pattern).
    #[must_use]
    pub fn exhausts(mut self) -> Self {
        self.exhaust = true;
        self
    }

    /// Mark as resolving at end of turn while held (builder pattern).
    #[must_use]
    pub fn at_end_of_turn(mut self) -> Self {
        self.end_of_turn = true;
        self
    }

    /// Require an active vow (builder pattern).
    #[must_use]
    pub fn requiring_vow(mut self) -> Self {
        self.requires_vow = true;
        self
    }

    /// Attach a price (builder pattern).
    #[must_use]
    pub fn with_price(mut self, health: i32, turns: u32) -> Self {
        self.price = Some(Price { health, turns });
        self
    }

    /// Cards with a negative cost can never be played.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.cost >= 0
    }

    /// Attack cards must be played against a living, targetable enemy.
    #[must_use]
    pub fn requires_target(&self) -> bool {
        self.card_type == CardType::Attack
    }
}
