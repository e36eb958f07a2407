//! Ordered card piles owned by a player: deck and hand.
//!
//! Both store entity handles, never cards. The deck's top is the end of the
//! vector so drawing is a pop.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameRng};

/// A player's deck. Top = last element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<EntityId>,
}

impl Deck {
    /// Create a deck; the last id is the top card.
    #[must_use]
    pub fn new(cards: Vec<EntityId>) -> Self {
        Self { cards }
    }

    /// The card that would be drawn next.
    #[must_use]
    pub fn top(&self) -> Option<EntityId> {
        self.cards.last().copied()
    }

    /// Put a card on top.
    pub fn push_top(&mut self, card: EntityId) {
        self.cards.push(card);
    }

    /// Remove a specific card. Returns whether it was in the deck.
    pub fn remove(&mut self, card: EntityId) -> bool {
        remove_first(&mut self.cards, card)
    }

    #[must_use]
    pub fn contains(&self, card: EntityId) -> bool {
        self.cards.contains(&card)
    }

    /// Shuffle with the game RNG.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn as_slice(&self) -> &[EntityId] {
        &self.cards
    }
}

/// A player's hand, in draw order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<EntityId>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: EntityId) {
        self.cards.push(card);
    }

    /// Remove a specific card. Returns whether it was in hand.
    pub fn remove(&mut self, card: EntityId) -> bool {
        remove_first(&mut self.cards, card)
    }

    #[must_use]
    pub fn contains(&self, card: EntityId) -> bool {
        self.cards.contains(&card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[EntityId] {
        &self.cards
    }
}

pub(crate) fn remove_first(cards: &mut Vec<EntityId>, card: EntityId) -> bool {
    match cards.iter().position(|&c| c == card) {
        Some(pos) => {
            cards.remove(pos);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_top_is_last() {
        let mut deck = Deck::new(vec![EntityId(1), EntityId(2), EntityId(3)]);
        assert_eq!(deck.top(), Some(EntityId(3)));

        assert!(deck.remove(EntityId(3)));
        assert_eq!(deck.top(), Some(EntityId(2)));
        assert!(!deck.remove(EntityId(3)));

        deck.push_top(EntityId(9));
        assert_eq!(deck.top(), Some(EntityId(9)));
        assert_eq!(deck.len(), 3);
    }

    #[test]
    fn test_deck_shuffle_is_seeded() {
        let ids: Vec<_> = (0..20).map(EntityId).collect();
        let mut a = Deck::new(ids.clone());
        let mut b = Deck::new(ids.clone());

        a.shuffle(&mut GameRng::new(11));
        b.shuffle(&mut GameRng::new(11));

        assert_eq!(a, b);
        assert_ne!(a.as_slice(), ids.as_slice());
    }

    #[test]
    fn test_empty_deck() {
        let deck = Deck::default();
        assert!(deck.is_empty());
        assert_eq!(deck.top(), None);
    }

    #[test]
    fn test_hand() {
        let mut hand = Hand::new();
        hand.push(EntityId(4));
        hand.push(EntityId(5));

        assert!(hand.contains(EntityId(4)));
        assert!(hand.remove(EntityId(4)));
        assert!(!hand.contains(EntityId(4)));
        assert_eq!(hand.as_slice(), &[EntityId(5)]);
    }
}
