//! This is the core module. It exports the non-holdem
//! related code.

/// card.rs has value and suit.
mod card;
/// Re-export Card, Value, and Suit
pub use self::card::{Card, Suit, Value, cards_from_str};

/// Error types.
mod error;
pub use self::error::EquityError;

/// A compact set of cards.
mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// We want to be able to iterate over combinations of cards.
mod card_iter;
/// Make that functionality public.
pub use self::card_iter::{CardIter, n_choose_k};

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck` and the deck of unseen cards.
pub use self::deck::{Deck, MAX_KNOWN_CARDS, remaining_deck};

/// Flattened deck
mod flat_deck;
pub use self::flat_deck::FlatDeck;

/// 5 Card hand ranking code.
mod rank;
/// Export the trait and the results.
pub use self::rank::{CATEGORIES_BEST_FIRST, HandCategory, HandScore, Rankable, evaluate};
