//! Draw pile and discard pile.

use alloc::collections::VecDeque;
use alloc::collections::vec_deque;
use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, Suit};

/// The face-down draw pile, consumed from the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Creates an empty deck.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: VecDeque::new(),
        }
    }

    /// Creates an unshuffled 52-card deck, one card per suit and rank.
    #[must_use]
    pub fn standard() -> Self {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| (1..=13).map(move |rank| Card::new(suit, rank)))
            .collect()
    }

    /// Shuffles the remaining cards in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Removes and returns the front card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Appends cards to the back of the deck.
    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    /// Returns the number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns whether the deck still holds the given card.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Iterates the remaining cards from the front.
    pub fn iter(&self) -> vec_deque::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = vec_deque::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// The face-up discard pile.
///
/// Only the top is visible to players. After a wild card the pile carries a
/// declared suit, and [`DiscardPile::top`] reports a virtual card of that
/// suit with the wild card's rank. The physical wild card stays in the pile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscardPile {
    cards: Vec<Card>,
    declared: Option<Suit>,
}

impl DiscardPile {
    /// Creates an empty discard pile.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            declared: None,
        }
    }

    /// Places a card on top, clearing any declared suit.
    pub fn place(&mut self, card: Card) {
        self.cards.push(card);
        self.declared = None;
    }

    /// Returns the card that plays are matched against.
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        let top = *self.cards.last()?;
        Some(self.declared.map_or(top, |suit| Card::new(suit, top.rank)))
    }

    /// Declares a suit for the current top and returns the resulting
    /// virtual card. Returns `None` when the pile is empty.
    pub fn declare_suit(&mut self, suit: Suit) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        self.declared = Some(suit);
        self.top()
    }

    /// Removes every card except the top one, oldest first.
    ///
    /// The declared suit, if any, survives.
    pub fn take_all_but_top(&mut self) -> Vec<Card> {
        let keep_from = self.cards.len().saturating_sub(1);
        self.cards.drain(..keep_from).collect()
    }

    /// Returns the physical cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of physical cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Empties the pile.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.declared = None;
    }
}

impl FromIterator<Card> for DiscardPile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
            declared: None,
        }
    }
}
