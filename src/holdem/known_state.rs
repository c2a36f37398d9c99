use crate::core::{Card, CardBitSet, EquityError, MAX_KNOWN_CARDS, cards_from_str};

/// Number of opponents still in the hand, always between
/// [`Opponents::MIN`] and [`Opponents::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct Opponents(usize);

impl Opponents {
    pub const MIN: usize = 1;
    pub const MAX: usize = 9;

    pub fn new(count: usize) -> Result<Self, EquityError> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(EquityError::OpponentCount(count))
        }
    }

    pub fn count(self) -> usize {
        self.0
    }

    /// One more opponent, staying put at the maximum.
    pub fn increment(self) -> Self {
        Self((self.0 + 1).min(Self::MAX))
    }

    /// One fewer opponent, staying put at the minimum.
    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for Opponents {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<usize> for Opponents {
    type Error = EquityError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Opponents> for usize {
    fn from(value: Opponents) -> Self {
        value.0
    }
}

/// Everything known about the current hand: the player's hole
/// cards, the community cards and how many opponents are left.
///
/// A `KnownState` is always valid once built:
/// - zero or two hole cards
/// - zero, three, four or five community cards
/// - no card shows up twice and at most seven are known
///
/// It is a plain value owned by the caller. Build a new one for
/// each scan rather than sharing one between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KnownState {
    hole_cards: Vec<Card>,
    community_cards: Vec<Card>,
    opponents: Opponents,
}

impl KnownState {
    pub fn new(
        hole_cards: Vec<Card>,
        community_cards: Vec<Card>,
        opponents: usize,
    ) -> Result<Self, EquityError> {
        let opponents = Opponents::new(opponents)?;
        Self::with_opponents(hole_cards, community_cards, opponents)
    }

    pub fn with_opponents(
        hole_cards: Vec<Card>,
        community_cards: Vec<Card>,
        opponents: Opponents,
    ) -> Result<Self, EquityError> {
        let known = hole_cards.len() + community_cards.len();
        if known > MAX_KNOWN_CARDS {
            return Err(EquityError::TooManyKnownCards(known));
        }
        if !matches!(hole_cards.len(), 0 | 2) {
            return Err(EquityError::HoleCardCount(hole_cards.len()));
        }
        if !matches!(community_cards.len(), 0 | 3 | 4 | 5) {
            return Err(EquityError::CommunityCardCount(community_cards.len()));
        }
        CardBitSet::try_from_cards(hole_cards.iter().chain(community_cards.iter()))
            .map_err(EquityError::DuplicateCard)?;

        Ok(Self {
            hole_cards,
            community_cards,
            opponents,
        })
    }

    /// Parse the state from card strings such as `"AhKd"` and
    /// `"7s8s9d"`.
    ///
    /// ```
    /// use hand_equity::holdem::KnownState;
    ///
    /// let known = KnownState::from_strs("AhKd", "7s8s9d", 3).unwrap();
    /// assert_eq!(2, known.cards_to_come());
    /// ```
    pub fn from_strs(hole: &str, community: &str, opponents: usize) -> Result<Self, EquityError> {
        Self::new(cards_from_str(hole)?, cards_from_str(community)?, opponents)
    }

    pub fn hole_cards(&self) -> &[Card] {
        &self.hole_cards
    }

    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }

    pub fn opponents(&self) -> Opponents {
        self.opponents
    }

    /// All known cards, hole cards first.
    pub fn known_cards(&self) -> impl Iterator<Item = &Card> {
        self.hole_cards.iter().chain(self.community_cards.iter())
    }

    /// Community cards still to be dealt.
    pub fn cards_to_come(&self) -> usize {
        5 - self.community_cards.len()
    }

    /// Are there enough cards known to compute anything?
    pub fn is_ready(&self) -> bool {
        self.hole_cards.len() == 2
    }

    /// Same cards, different number of opponents.
    pub fn set_opponents(&mut self, opponents: Opponents) {
        self.opponents = opponents;
    }

    /// The next state of the same hand after more community cards
    /// were revealed.
    ///
    /// Cards already on the board must stay, in the same positions,
    /// and the hole cards can't change. Use [`KnownState::new`] when
    /// a new hand starts.
    pub fn advance_board(&self, community_cards: Vec<Card>) -> Result<Self, EquityError> {
        if community_cards.len() < self.community_cards.len() {
            return Err(EquityError::BoardShrunk {
                old: self.community_cards.len(),
                new: community_cards.len(),
            });
        }
        if let Some((old, _)) = self
            .community_cards
            .iter()
            .zip(community_cards.iter())
            .find(|(old, new)| old != new)
        {
            return Err(EquityError::BoardChanged(*old));
        }
        Self::with_opponents(self.hole_cards.clone(), community_cards, self.opponents)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for KnownState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            hole_cards: Vec<Card>,
            #[serde(default)]
            community_cards: Vec<Card>,
            opponents: Opponents,
        }

        let raw = Raw::deserialize(deserializer)?;
        KnownState::with_opponents(raw.hole_cards, raw.community_cards, raw.opponents)
            .map_err(serde::de::Error::custom)
    }
}
