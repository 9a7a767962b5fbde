//! The player's four card piles.
//!
//! Every card instance belongs to exactly one pile at a time; moving a card
//! between piles is the only mutation a pile undergoes. Piles use `im`
//! vectors so taking a combat snapshot is O(1).
//!
//! The top of the draw pile is the back of its vector.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::rng::GameRng;

/// One of the player's card piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PileKind {
    Hand,
    Draw,
    Discard,
    Exhaust,
}

impl std::fmt::Display for PileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PileKind::Hand => "hand",
            PileKind::Draw => "draw pile",
            PileKind::Discard => "discard pile",
            PileKind::Exhaust => "exhaust pile",
        };
        write!(f, "{}", label)
    }
}

/// Result of drawing one card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawn {
    pub card: CardInstance,
    /// The discard pile was shuffled into the draw pile first.
    pub reshuffled: bool,
    /// Where the card landed (`Hand`, or `Discard` when the hand was full).
    pub destination: PileKind,
}

/// Hand, draw, discard and exhaust piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    hand: Vector<CardInstance>,
    draw: Vector<CardInstance>,
    discard: Vector<CardInstance>,
    exhaust: Vector<CardInstance>,
}

impl Piles {
    /// Create piles with the whole deck in the draw pile.
    #[must_use]
    pub fn new(deck: Vec<CardInstance>) -> Self {
        Self {
            draw: deck.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Get a pile.
    #[must_use]
    pub fn pile(&self, kind: PileKind) -> &Vector<CardInstance> {
        match kind {
            PileKind::Hand => &self.hand,
            PileKind::Draw => &self.draw,
            PileKind::Discard => &self.discard,
            PileKind::Exhaust => &self.exhaust,
        }
    }

    fn pile_mut(&mut self, kind: PileKind) -> &mut Vector<CardInstance> {
        match kind {
            PileKind::Hand => &mut self.hand,
            PileKind::Draw => &mut self.draw,
            PileKind::Discard => &mut self.discard,
            PileKind::Exhaust => &mut self.exhaust,
        }
    }

    /// The hand, in order.
    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    /// Number of cards in a pile.
    #[must_use]
    pub fn len(&self, kind: PileKind) -> usize {
        self.pile(kind).len()
    }

    /// Total cards across all piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.hand.len() + self.draw.len() + self.discard.len() + self.exhaust.len()
    }

    /// Iterate over every card in every pile.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.hand
            .iter()
            .chain(self.draw.iter())
            .chain(self.discard.iter())
            .chain(self.exhaust.iter())
    }

    /// Card at a hand index.
    #[must_use]
    pub fn hand_card(&self, index: usize) -> Option<&CardInstance> {
        self.hand.get(index)
    }

    /// Shuffle the draw pile in place.
    pub fn shuffle_draw(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<CardInstance> = self.draw.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.draw = cards.into_iter().collect();
    }

    /// Shuffle the discard pile into the draw pile.
    ///
    /// Returns the number of cards moved.
    pub fn reshuffle_discard(&mut self, rng: &mut GameRng) -> usize {
        let mut cards: Vec<CardInstance> = std::mem::take(&mut self.discard).into_iter().collect();
        let moved = cards.len();
        rng.shuffle(&mut cards);
        // Reshuffled cards go underneath anything still in the draw pile
        for card in self.draw.iter().cloned() {
            cards.push(card);
        }
        self.draw = cards.into_iter().collect();
        moved
    }

    /// Draw the top card.
    ///
    /// Reshuffles the discard pile in when the draw pile is empty. Cards
    /// beyond `max_hand_size` go to the discard pile. Returns `None` when
    /// both the draw and discard piles are empty.
    pub fn draw(&mut self, rng: &mut GameRng, max_hand_size: usize) -> Option<Drawn> {
        let mut reshuffled = false;
        if self.draw.is_empty() {
            if self.discard.is_empty() {
                return None;
            }
            self.reshuffle_discard(rng);
            reshuffled = true;
        }

        let card = self.draw.pop_back()?;
        let destination = if self.hand.len() >= max_hand_size {
            PileKind::Discard
        } else {
            PileKind::Hand
        };
        self.pile_mut(destination).push_back(card.clone());

        Some(Drawn {
            card,
            reshuffled,
            destination,
        })
    }

    /// Remove and return the card at a hand index.
    pub fn take_from_hand(&mut self, index: usize) -> Option<CardInstance> {
        if index >= self.hand.len() {
            return None;
        }
        Some(self.hand.remove(index))
    }

    /// Put a card on top of a pile.
    pub fn push(&mut self, kind: PileKind, card: CardInstance) {
        self.pile_mut(kind).push_back(card);
    }

    /// Move the whole hand to the discard pile, preserving order.
    ///
    /// Returns the moved cards.
    pub fn discard_hand(&mut self) -> Vec<CardInstance> {
        let hand: Vec<CardInstance> = std::mem::take(&mut self.hand).into_iter().collect();
        for card in &hand {
            self.discard.push_back(card.clone());
        }
        hand
    }

    /// Remove a random card from a pile.
    pub fn remove_random(&mut self, kind: PileKind, rng: &mut GameRng) -> Option<CardInstance> {
        let pile = self.pile_mut(kind);
        let index = rng.choose_index(pile.len())?;
        Some(pile.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardType};
    use crate::core::entity::InstanceId;
    use std::sync::Arc;

    fn deck(n: u32) -> Vec<CardInstance> {
        let def = Arc::new(CardDefinition::new(CardId::new(1), "Strike", CardType::Attack, 1));
        (0..n).map(|i| CardInstance::new(InstanceId(i), Arc::clone(&def))).collect()
    }

    fn sorted_ids(piles: &Piles) -> Vec<u32> {
        let mut ids: Vec<u32> = piles.all_cards().map(|c| c.id.raw()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_new_puts_deck_in_draw() {
        let piles = Piles::new(deck(10));
        assert_eq!(piles.len(PileKind::Draw), 10);
        assert_eq!(piles.len(PileKind::Hand), 0);
        assert_eq!(piles.total(), 10);
    }

    #[test]
    fn test_draw_takes_from_top() {
        let mut rng = GameRng::new(1);
        let mut piles = Piles::new(deck(3));

        let drawn = piles.draw(&mut rng, 10).unwrap();

        assert_eq!(drawn.card.id, InstanceId(2));
        assert_eq!(drawn.destination, PileKind::Hand);
        assert!(!drawn.reshuffled);
        assert_eq!(piles.len(PileKind::Hand), 1);
    }

    #[test]
    fn test_draw_reshuffles_discard() {
        let mut rng = GameRng::new(1);
        let mut piles = Piles::new(deck(4));
        for _ in 0..4 {
            piles.draw(&mut rng, 10);
        }
        piles.discard_hand();
        assert_eq!(piles.len(PileKind::Draw), 0);

        let drawn = piles.draw(&mut rng, 10).unwrap();

        assert!(drawn.reshuffled);
        assert_eq!(piles.len(PileKind::Draw), 3);
        assert_eq!(piles.len(PileKind::Discard), 0);
        assert_eq!(sorted_ids(&piles), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_draw_stops_when_both_empty() {
        let mut rng = GameRng::new(1);
        let mut piles = Piles::new(deck(1));

        assert!(piles.draw(&mut rng, 10).is_some());
        assert!(piles.draw(&mut rng, 10).is_none());
    }

    #[test]
    fn test_overflow_goes_to_discard() {
        let mut rng = GameRng::new(1);
        let mut piles = Piles::new(deck(3));

        piles.draw(&mut rng, 2);
        piles.draw(&mut rng, 2);
        let drawn = piles.draw(&mut rng, 2).unwrap();

        assert_eq!(drawn.destination, PileKind::Discard);
        assert_eq!(piles.len(PileKind::Hand), 2);
        assert_eq!(piles.len(PileKind::Discard), 1);
    }

    #[test]
    fn test_take_from_hand() {
        let mut rng = GameRng::new(1);
        let mut piles = Piles::new(deck(3));
        piles.draw(&mut rng, 10);
        piles.draw(&mut rng, 10);

        let card = piles.take_from_hand(0).unwrap();
        assert_eq!(card.id, InstanceId(2));
        assert!(piles.take_from_hand(5).is_none());
        assert_eq!(piles.len(PileKind::Hand), 1);
    }

    #[test]
    fn test_discard_hand_preserves_cards() {
        let mut rng = GameRng::new(3);
        let mut piles = Piles::new(deck(6));
        piles.shuffle_draw(&mut rng);
        for _ in 0..5 {
            piles.draw(&mut rng, 10);
        }

        let moved = piles.discard_hand();

        assert_eq!(moved.len(), 5);
        assert!(piles.hand().is_empty());
        assert_eq!(piles.len(PileKind::Discard), 5);
        assert_eq!(sorted_ids(&piles), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_remove_random() {
        let mut rng = GameRng::new(9);
        let mut piles = Piles::new(deck(4));

        assert!(piles.remove_random(PileKind::Draw, &mut rng).is_some());
        assert_eq!(piles.total(), 3);
        assert!(piles.remove_random(PileKind::Exhaust, &mut rng).is_none());
    }
}
