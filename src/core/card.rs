use std::fmt;

use super::EquityError;

/// Card rank or value.
/// This is basically the face value - 2
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values.
/// This is what `Value::values()` returns
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Take a u8 and convert it to a value.
    /// Anything past the ace is clamped to the ace.
    pub fn from_u8(v: u8) -> Value {
        VALUES[usize::from(v.min(12))]
    }

    /// Get all of the `Value`'s that are possible.
    /// This is used to iterate through all possible
    /// values when creating a new deck.
    pub fn values() -> [Value; 13] {
        VALUES
    }

    /// The face rank of the card, 2 through 14 with the ace as 14.
    ///
    /// ```
    /// use hand_equity::core::Value;
    ///
    /// assert_eq!(2, Value::Two.rank());
    /// assert_eq!(14, Value::Ace.rank());
    /// ```
    pub fn rank(self) -> u8 {
        self as u8 + 2
    }

    /// Build a value from a face rank in 2..=14.
    pub fn from_rank(rank: u8) -> Option<Value> {
        match rank {
            2..=14 => Some(VALUES[usize::from(rank - 2)]),
            _ => None,
        }
    }

    /// Parse the single character notation. Lower case is accepted.
    pub fn from_char(c: char) -> Option<Value> {
        match c.to_ascii_uppercase() {
            'A' => Some(Value::Ace),
            'K' => Some(Value::King),
            'Q' => Some(Value::Queen),
            'J' => Some(Value::Jack),
            'T' => Some(Value::Ten),
            '9' => Some(Value::Nine),
            '8' => Some(Value::Eight),
            '7' => Some(Value::Seven),
            '6' => Some(Value::Six),
            '5' => Some(Value::Five),
            '4' => Some(Value::Four),
            '3' => Some(Value::Three),
            '2' => Some(Value::Two),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Value::Ace => 'A',
            Value::King => 'K',
            Value::Queen => 'Q',
            Value::Jack => 'J',
            Value::Ten => 'T',
            Value::Nine => '9',
            Value::Eight => '8',
            Value::Seven => '7',
            Value::Six => '6',
            Value::Five => '5',
            Value::Four => '4',
            Value::Three => '3',
            Value::Two => '2',
        }
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Suit {
    /// Spades
    Spade = 0,
    /// Clubs
    Club = 1,
    /// Hearts
    Heart = 2,
    /// Diamonds
    Diamond = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    /// Provide all the Suit's that there are.
    pub fn suits() -> [Suit; 4] {
        SUITS
    }

    pub fn from_u8(s: u8) -> Suit {
        SUITS[usize::from(s & 3)]
    }

    pub fn from_char(s: char) -> Option<Suit> {
        match s.to_ascii_lowercase() {
            'd' => Some(Suit::Diamond),
            's' => Some(Suit::Spade),
            'h' => Some(Suit::Heart),
            'c' => Some(Suit::Club),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Club => 'c',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
        }
    }
}

/// The main struct of this library.
/// This is a carrier for Suit and Value combined.
///
/// Cards order by value first and suit second, which is
/// also the order of the canonical 52 card universe.
#[derive(PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
pub struct Card {
    /// The face value of this card.
    pub value: Value,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }
}

/// Index of the card in the canonical rank-major, suit-minor order.
impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.value as u8 * 4 + card.suit as u8
    }
}

impl From<u8> for Card {
    fn from(idx: u8) -> Self {
        Self {
            value: Value::from_u8(idx / 4),
            suit: Suit::from_u8(idx % 4),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self)
    }
}

/// Parse a single card such as `"Ah"`, `"Td"` or `"10d"`.
impl TryFrom<&str> for Card {
    type Error = EquityError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        let (value_str, suit_str) = match s.char_indices().last() {
            Some((idx, _)) => s.split_at(idx),
            None => return Err(EquityError::TooFewChars),
        };
        let value = match value_str {
            "10" => Value::Ten,
            _ => {
                let mut chars = value_str.chars();
                let v = chars
                    .next()
                    .ok_or(EquityError::TooFewChars)?;
                if chars.next().is_some() {
                    return Err(EquityError::UnparsedCharsRemaining);
                }
                Value::from_char(v).ok_or(EquityError::UnexpectedValueChar)?
            }
        };
        let suit = suit_str
            .chars()
            .next()
            .and_then(Suit::from_char)
            .ok_or(EquityError::UnexpectedSuitChar)?;
        Ok(Card { value, suit })
    }
}

/// Parse a run of cards written back to back, `"AhKd"`.
///
/// Whitespace and commas between cards are ignored. Duplicates are
/// not rejected here; that is up to whatever the cards end up in.
///
/// ```
/// use hand_equity::core::{Card, Suit, Value, cards_from_str};
///
/// let cards = cards_from_str("AhKd").unwrap();
/// assert_eq!(vec![Card::new(Value::Ace, Suit::Heart), Card::new(Value::King, Suit::Diamond)], cards);
/// ```
pub fn cards_from_str(cards: &str) -> Result<Vec<Card>, EquityError> {
    let mut chars = cards
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .peekable();
    let mut result = Vec::with_capacity(7);

    while let Some(vc) = chars.next() {
        let value = if vc == '1' && chars.peek() == Some(&'0') {
            chars.next();
            Value::Ten
        } else {
            Value::from_char(vc).ok_or(EquityError::UnexpectedValueChar)?
        };
        let suit = chars
            .next()
            .ok_or(EquityError::TooFewChars)
            .and_then(|sc| Suit::from_char(sc).ok_or(EquityError::UnexpectedSuitChar))?;
        result.push(Card { value, suit });
    }

    Ok(result)
}

#[cfg(feature = "serde")]
impl serde::Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Card::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}
