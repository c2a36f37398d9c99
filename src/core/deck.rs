use super::{Card, CardBitSet, EquityError, FlatDeck};

/// The most cards that can be known about a single holdem hand:
/// two hole cards and five on the board.
pub const MAX_KNOWN_CARDS: usize = 7;

/// Deck struct that can tell quickly if a card is in the deck
///
/// It starts as the full 52 card universe and cards are
/// taken out as they become known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck(CardBitSet);

impl Deck {
    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.0.contains(*c)
    }

    /// Given a card remove it from the deck if it is present.
    pub fn remove(&mut self, c: &Card) -> bool {
        let contains = self.contains(c);
        self.0.remove(*c);
        contains
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.0.count()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Deck {
    /// Create the default 52 card deck
    ///
    /// ```
    /// use hand_equity::core::Deck;
    ///
    /// assert_eq!(52, Deck::default().len());
    /// ```
    fn default() -> Self {
        Self(CardBitSet::default())
    }
}

/// Turn a deck into an iterator
impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = super::CardBitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The 52 card universe minus every `known` card, in canonical
/// rank-major, suit-minor order.
///
/// The order is fixed so that sampling from the result with a
/// seeded generator is reproducible.
///
/// ```
/// use hand_equity::core::{cards_from_str, remaining_deck};
///
/// let known = cards_from_str("AhAd").unwrap();
/// let deck = remaining_deck(&known).unwrap();
/// assert_eq!(50, deck.len());
/// ```
pub fn remaining_deck(known: &[Card]) -> Result<FlatDeck, EquityError> {
    if known.len() > MAX_KNOWN_CARDS {
        return Err(EquityError::TooManyKnownCards(known.len()));
    }
    let mut deck = Deck::default();
    for card in known {
        if !deck.remove(card) {
            return Err(EquityError::DuplicateCard(*card));
        }
    }
    Ok(deck.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Suit, Value, cards_from_str};

    #[test]
    fn test_contains_in() {
        let d = Deck::default();
        assert!(d.contains(&Card {
            value: Value::Eight,
            suit: Suit::Heart,
        }));
    }

    #[test]
    fn test_remove() {
        let mut d = Deck::default();
        let c = Card {
            value: Value::Ace,
            suit: Suit::Heart,
        };
        assert!(d.contains(&c));
        assert!(d.remove(&c));
        assert!(!d.contains(&c));
        assert!(!d.remove(&c));
        assert_eq!(51, d.len());
    }

    #[test]
    fn test_remaining_excludes_known() {
        let known = cards_from_str("7s2cKdQc9s").unwrap();
        let deck = remaining_deck(&known).unwrap();
        assert_eq!(47, deck.len());
        for card in &known {
            assert!(!deck[..].contains(card));
        }
    }

    #[test]
    fn test_remaining_is_canonical_order() {
        let deck = remaining_deck(&cards_from_str("2s").unwrap()).unwrap();
        assert_eq!(Card::new(Value::Two, Suit::Club), deck[0]);
        assert_eq!(Card::new(Value::Ace, Suit::Diamond), deck[deck.len() - 1]);
        assert!(deck[..].windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_remaining_duplicate() {
        let known = cards_from_str("AhKdAh").unwrap();
        assert_eq!(
            Err(EquityError::DuplicateCard(Card::new(Value::Ace, Suit::Heart))),
            remaining_deck(&known)
        );
    }

    #[test]
    fn test_remaining_too_many() {
        let known = cards_from_str("AhKdQdJdTd9d8d").unwrap();
        assert!(remaining_deck(&known).is_ok());

        let known = cards_from_str("AhKdQdJdTd9d8d7d").unwrap();
        assert_eq!(
            Err(EquityError::TooManyKnownCards(8)),
            remaining_deck(&known)
        );
    }
}
