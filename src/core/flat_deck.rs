use std::ops::{Index, Range, RangeFrom, RangeFull, RangeTo};

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, Deck};

/// `FlatDeck` is a deck of cards that allows easy
/// indexing into the cards. It does not provide
/// contains methods.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatDeck {
    /// Card storage.
    cards: Vec<Card>,
}

impl FlatDeck {
    /// How many cards are there in the deck ?
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all cards been dealt ?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Randomly shuffle the flat deck.
    /// This will ensure the there's no order to the deck.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng)
    }

    /// Shuffle just enough to take `amount` uniformly random cards
    /// without replacement and hand them back.
    ///
    /// This is a fisher-yates shuffle stopped after `amount` swaps, so
    /// the result is the same as shuffling everything and taking the
    /// front of the deck. The deck keeps all of its cards.
    ///
    /// `amount` larger than the deck takes the whole deck.
    pub fn shuffle_take<R: Rng + ?Sized>(&mut self, rng: &mut R, amount: usize) -> &[Card] {
        let (taken, _) = self.cards.partial_shuffle(rng, amount);
        taken
    }
}

impl Index<usize> for FlatDeck {
    type Output = Card;
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}
impl Index<Range<usize>> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: Range<usize>) -> &[Card] {
        &self.cards[index]
    }
}
impl Index<RangeTo<usize>> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: RangeTo<usize>) -> &[Card] {
        &self.cards[index]
    }
}
impl Index<RangeFrom<usize>> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: RangeFrom<usize>) -> &[Card] {
        &self.cards[index]
    }
}
impl Index<RangeFull> for FlatDeck {
    type Output = [Card];
    fn index(&self, index: RangeFull) -> &[Card] {
        &self.cards[index]
    }
}

impl From<Vec<Card>> for FlatDeck {
    fn from(value: Vec<Card>) -> Self {
        Self { cards: value }
    }
}

/// Allow creating a flat deck from a Deck
impl From<Deck> for FlatDeck {
    /// Flatten this deck, consuming it to produce a `FlatDeck` that's
    /// easier to get random access to.
    ///
    /// The cards come out sorted so that the same input
    /// cards always result in the same starting flat deck
    fn from(value: Deck) -> Self {
        Self {
            cards: value.into_iter().collect(),
        }
    }
}
