use thiserror::Error;

use super::Card;

/// This is the core error type for the equity engine.
/// It uses `thiserror` to provide readable error messages.
///
/// Variants fall in three families: parsing, invalid known state
/// (see [`EquityError::is_invalid_state`]) and dealing.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EquityError {
    #[error("Unable to parse value")]
    UnexpectedValueChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,

    #[error("Card {0} is known more than once")]
    DuplicateCard(Card),
    #[error("Expected 0 or 2 hole cards, found {0}")]
    HoleCardCount(usize),
    #[error("Expected 0, 3, 4 or 5 community cards, found {0}")]
    CommunityCardCount(usize),
    #[error("Holdem hands should never have more than 7 known cards, found {0}")]
    TooManyKnownCards(usize),
    #[error("Opponent count must be between 1 and 9, found {0}")]
    OpponentCount(usize),
    #[error("Hands must have 5 to 7 cards to be evaluated, found {0}")]
    HandSize(usize),
    #[error("Community cards can't be taken back during a hand ({old} known, {new} given)")]
    BoardShrunk { old: usize, new: usize },
    #[error("Community card {0} was already revealed and can't change")]
    BoardChanged(Card),
    #[error("Deal doesn't match the known state: {0}")]
    DealShape(&'static str),

    #[error("Need {needed} unseen cards but only {available} remain in the deck")]
    InsufficientCards { needed: usize, available: usize },
    #[error("Trial budget must be positive")]
    ZeroTrialBudget,
    #[error("Trial budget {budget} is over the maximum of {max}")]
    TrialBudgetTooLarge { budget: usize, max: usize },
    #[error("Enumeration limit {limit} is over the maximum of {max}")]
    EnumerationLimitTooLarge { limit: u64, max: u64 },
    #[error("No deals were produced so there is nothing to normalize")]
    EmptySample,
}

impl EquityError {
    /// Is this error a malformed known state or deal?
    ///
    /// Callers polling for new cards should discard the offending
    /// input and keep showing the last good result when this is true.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            EquityError::DuplicateCard(_)
                | EquityError::HoleCardCount(_)
                | EquityError::CommunityCardCount(_)
                | EquityError::TooManyKnownCards(_)
                | EquityError::OpponentCount(_)
                | EquityError::HandSize(_)
                | EquityError::BoardShrunk { .. }
                | EquityError::BoardChanged(_)
                | EquityError::DealShape(_)
        )
    }
}
