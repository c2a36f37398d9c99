use std::fmt;

use super::{Card, CardBitSet, EquityError, Value};

/// The nine hand categories, from worst to best.
///
/// The derived ordering follows poker strength, so
/// `HandCategory::StraightFlush` is the largest.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Every category, best first. This is the order hand
/// tables are usually displayed in.
pub const CATEGORIES_BEST_FIRST: [HandCategory; 9] = [
    HandCategory::StraightFlush,
    HandCategory::FourOfAKind,
    HandCategory::FullHouse,
    HandCategory::Flush,
    HandCategory::Straight,
    HandCategory::ThreeOfAKind,
    HandCategory::TwoPair,
    HandCategory::OnePair,
    HandCategory::HighCard,
];

impl HandCategory {
    /// Number of categories.
    pub const COUNT: usize = 9;

    /// Position of the category, 0 for high card up to 8.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    pub fn from_name(name: &str) -> Option<HandCategory> {
        CATEGORIES_BEST_FIRST
            .iter()
            .copied()
            .find(|c| c.name() == name)
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// The strength of the best five card hand.
///
/// For each variant the `u32` orders hands inside the category. It
/// holds the deciding card values packed four bits each, most
/// significant first, stored as value + 1 so that an empty slot is
/// zero. Comparing two scores is a strict total order except for
/// hands that really tie.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum HandScore {
    /// The lowest rank.
    /// No matches. All five values high to low.
    HighCard(u32),
    /// One Card matches another. Pair then three kickers.
    OnePair(u32),
    /// Two diffent pair of matching cards. High pair, low pair, kicker.
    TwoPair(u32),
    /// Three of the same value. Trips then two kickers.
    ThreeOfAKind(u32),
    /// Five cards in a sequence. Only the top of the run.
    Straight(u32),
    /// Five cards of the same suit. All five values high to low.
    Flush(u32),
    /// Three of one value and two of another value
    FullHouse(u32),
    /// Four of the same value, then the kicker.
    FourOfAKind(u32),
    /// Five cards in a sequence all fo the same suit.
    StraightFlush(u32),
}

impl HandScore {
    pub fn category(&self) -> HandCategory {
        match self {
            HandScore::HighCard(_) => HandCategory::HighCard,
            HandScore::OnePair(_) => HandCategory::OnePair,
            HandScore::TwoPair(_) => HandCategory::TwoPair,
            HandScore::ThreeOfAKind(_) => HandCategory::ThreeOfAKind,
            HandScore::Straight(_) => HandCategory::Straight,
            HandScore::Flush(_) => HandCategory::Flush,
            HandScore::FullHouse(_) => HandCategory::FullHouse,
            HandScore::FourOfAKind(_) => HandCategory::FourOfAKind,
            HandScore::StraightFlush(_) => HandCategory::StraightFlush,
        }
    }

    /// The packed tie break value.
    pub fn tie_break(&self) -> u32 {
        match *self {
            HandScore::HighCard(v)
            | HandScore::OnePair(v)
            | HandScore::TwoPair(v)
            | HandScore::ThreeOfAKind(v)
            | HandScore::Straight(v)
            | HandScore::Flush(v)
            | HandScore::FullHouse(v)
            | HandScore::FourOfAKind(v)
            | HandScore::StraightFlush(v) => v,
        }
    }

    /// Unpack the tie break into the values that decide it, in
    /// the order they are compared.
    ///
    /// ```
    /// use hand_equity::core::{Rankable, Value, cards_from_str};
    ///
    /// let hand: [_; 5] = cards_from_str("AhAdKs9c2c").unwrap().try_into().unwrap();
    /// assert_eq!(
    ///     vec![Value::Ace, Value::King, Value::Nine, Value::Two],
    ///     hand.rank().values()
    /// );
    /// ```
    pub fn values(&self) -> Vec<Value> {
        let packed = self.tie_break();
        (0..8)
            .rev()
            .map(|slot| ((packed >> (slot * 4)) & 0xF) as u8)
            .filter(|nibble| *nibble != 0)
            .map(|nibble| Value::from_u8(nibble - 1))
            .collect()
    }
}

/// Pack values into a tie break, first value most significant.
fn pack<I: IntoIterator<Item = Value>>(values: I) -> u32 {
    values
        .into_iter()
        .fold(0, |acc, v| (acc << 4) | (v as u32 + 1))
}

/// Value set of the wheel, where the ace plays low.
const WHEEL: u16 = 1 << Value::Ace as u16
    | 1 << Value::Two as u16
    | 1 << Value::Three as u16
    | 1 << Value::Four as u16
    | 1 << Value::Five as u16;

/// If the value set is exactly a straight give the top of it.
fn straight_high(value_set: u16) -> Option<Value> {
    if value_set == WHEEL {
        return Some(Value::Five);
    }
    // Five consecutive bits.
    let low = value_set.trailing_zeros();
    if value_set.count_ones() == 5 && value_set >> low == 0b1_1111 {
        Some(Value::from_u8(low as u8 + 4))
    } else {
        None
    }
}

/// Rank exactly five cards.
fn rank_five(cards: &[Card]) -> HandScore {
    debug_assert_eq!(5, cards.len());

    let mut value_counts = [0u8; 13];
    let mut value_set: u16 = 0;
    let mut suit_set: u8 = 0;
    for c in cards {
        value_counts[c.value as usize] += 1;
        value_set |= 1 << c.value as u16;
        suit_set |= 1 << c.suit as u8;
    }

    // The major deciding factor for hand rank
    // is the number of unique card values.
    let unique_card_count = value_set.count_ones();

    if unique_card_count == 5 {
        // If there are five different cards it can be a straight
        // a straight flush, a flush, or just a high card.
        let is_flush = suit_set.count_ones() == 1;
        let high_to_low = (0..13u8)
            .rev()
            .filter(|v| value_set & (1 << *v) != 0)
            .map(Value::from_u8);
        return match (straight_high(value_set), is_flush) {
            (Some(high), true) => HandScore::StraightFlush(pack([high])),
            (Some(high), false) => HandScore::Straight(pack([high])),
            (None, true) => HandScore::Flush(pack(high_to_low)),
            (None, false) => HandScore::HighCard(pack(high_to_low)),
        };
    }

    // Values grouped by how many times they show up, bigger groups
    // first and higher values first inside a group size.
    let mut groups: Vec<(u8, Value)> = (0..13u8)
        .rev()
        .filter(|v| value_counts[*v as usize] > 0)
        .map(|v| (value_counts[v as usize], Value::from_u8(v)))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let largest = groups[0].0;
    let tie_break = pack(groups.iter().map(|(_, v)| *v));

    match (unique_card_count, largest) {
        (2, 4) => HandScore::FourOfAKind(tie_break),
        (2, _) => HandScore::FullHouse(tie_break),
        (3, 3) => HandScore::ThreeOfAKind(tie_break),
        (3, _) => HandScore::TwoPair(tie_break),
        _ => HandScore::OnePair(tie_break),
    }
}

/// Best score over every five card subset of five to seven cards.
///
/// Each subset is a bit mask over the input positions with exactly
/// five bits set, copied into a stack array.
fn rank_best(cards: &[Card]) -> HandScore {
    debug_assert!((5..=7).contains(&cards.len()));
    if cards.len() == 5 {
        return rank_five(cards);
    }

    let mut best = HandScore::HighCard(0);
    let mut five = [cards[0]; 5];
    for mask in 0u8..(1 << cards.len()) {
        if mask.count_ones() != 5 {
            continue;
        }
        let picked = cards
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, c)| *c);
        for (slot, card) in five.iter_mut().zip(picked) {
            *slot = card;
        }
        best = best.max(rank_five(&five));
    }
    best
}

/// Can this turn into a hand score?
///
/// Implemented for the fixed hand sizes the evaluator accepts. The
/// cards must all be different; that is only checked in debug
/// builds. Use [`evaluate`] to rank a slice that hasn't been checked.
pub trait Rankable {
    /// Rank the best five card hand. It doesn't do any caching so
    /// duplicate work will be done if this is called more than once.
    fn rank(&self) -> HandScore;
}

impl Rankable for [Card; 5] {
    fn rank(&self) -> HandScore {
        debug_assert!(CardBitSet::try_from_cards(self).is_ok());
        rank_five(self)
    }
}

impl Rankable for [Card; 6] {
    fn rank(&self) -> HandScore {
        debug_assert!(CardBitSet::try_from_cards(self).is_ok());
        rank_best(self)
    }
}

impl Rankable for [Card; 7] {
    fn rank(&self) -> HandScore {
        debug_assert!(CardBitSet::try_from_cards(self).is_ok());
        rank_best(self)
    }
}

/// Evaluate five to seven cards, returning the score of the best
/// five card hand among them.
///
/// Fails with [`EquityError::HandSize`] for other sizes and
/// [`EquityError::DuplicateCard`] if a card is repeated.
///
/// ```
/// use hand_equity::core::{HandCategory, cards_from_str, evaluate};
///
/// let wheel = cards_from_str("As2s3s4s5s").unwrap();
/// assert_eq!(HandCategory::StraightFlush, evaluate(&wheel).unwrap().category());
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandScore, EquityError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EquityError::HandSize(cards.len()));
    }
    CardBitSet::try_from_cards(cards).map_err(EquityError::DuplicateCard)?;
    Ok(rank_best(cards))
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::core::{CardIter, Deck, FlatDeck, Suit, cards_from_str};

    fn score(s: &str) -> HandScore {
        evaluate(&cards_from_str(s).unwrap()).unwrap()
    }

    fn packed(values: &[Value]) -> u32 {
        pack(values.iter().copied())
    }

    #[test]
    fn test_cmp() {
        assert!(HandScore::HighCard(0) < HandScore::StraightFlush(0));
        assert!(HandScore::HighCard(0) < HandScore::FourOfAKind(0));
        assert!(HandScore::HighCard(0) < HandScore::ThreeOfAKind(0));
        assert!(HandScore::HighCard(u32::MAX) < HandScore::OnePair(0));
    }

    #[test]
    fn test_cmp_high() {
        assert!(HandScore::HighCard(0) < HandScore::HighCard(100));
    }

    #[test]
    fn test_high_card_hand() {
        assert_eq!(
            HandScore::HighCard(packed(&[
                Value::Ace,
                Value::Ten,
                Value::Nine,
                Value::Eight,
                Value::Five
            ])),
            score("AdTh9c8c5c")
        );
    }

    #[test]
    fn test_flush() {
        assert_eq!(
            HandScore::Flush(packed(&[
                Value::Ace,
                Value::Ten,
                Value::Nine,
                Value::Eight,
                Value::Five
            ])),
            score("Ad8d9dTd5d")
        );
    }

    #[test]
    fn test_full_house() {
        assert_eq!(
            HandScore::FullHouse(packed(&[Value::Nine, Value::Ace])),
            score("AdAc9d9c9s")
        );
    }

    #[test]
    fn test_two_pair() {
        assert_eq!(
            HandScore::TwoPair(packed(&[Value::Ace, Value::Nine, Value::Ten])),
            score("AdAc9d9cTs")
        );
    }

    #[test]
    fn test_one_pair() {
        assert_eq!(
            HandScore::OnePair(packed(&[Value::Ace, Value::Ten, Value::Nine, Value::Eight])),
            score("AdAc9d8cTs")
        );
    }

    #[test]
    fn test_four_of_a_kind() {
        assert_eq!(
            HandScore::FourOfAKind(packed(&[Value::Ace, Value::Ten])),
            score("AdAcAsAhTs")
        );
    }

    #[test]
    fn test_three_of_a_kind() {
        assert_eq!(
            HandScore::ThreeOfAKind(packed(&[Value::Two, Value::Six, Value::Five])),
            score("2c2s2h5s6d")
        );
    }

    #[test]
    fn test_wheel() {
        assert_eq!(HandScore::Straight(packed(&[Value::Five])), score("Ad2c3s4h5s"));
    }

    #[test]
    fn test_wheel_straight_flush() {
        let s = score("As2s3s4s5s");
        assert_eq!(HandScore::StraightFlush(packed(&[Value::Five])), s);
        // The wheel is the lowest straight flush.
        assert!(s < score("2s3s4s5s6s"));
    }

    #[test]
    fn test_straight() {
        assert_eq!(HandScore::Straight(packed(&[Value::Six])), score("2c3s4h5s6d"));
        assert_eq!(HandScore::Straight(packed(&[Value::Ace])), score("TcJsQhKsAd"));
        // The ace only wraps for the wheel.
        assert_eq!(HandCategory::HighCard, score("QcKsAh2s3d").category());
    }

    #[test]
    fn test_straight_beats_wheel() {
        assert!(score("2c3s4h5s6d") > score("Ad2c3s4h5s"));
    }

    #[test]
    fn test_category_order_transitive() {
        let ladder = [
            "2c4d6h8sTc", // high card
            "2c2d6h8sTc", // pair
            "2c2d6h6sTc", // two pair
            "2c2d2h8sTc", // trips
            "Ad2c3s4h5s", // wheel
            "2h4h6h8hTh", // flush
            "2c2d2h8s8c", // full house
            "2c2d2h2s3c", // quads
            "As2s3s4s5s", // straight flush
        ];
        let scores: Vec<HandScore> = ladder.iter().map(|h| score(h)).collect();
        for (i, lower) in scores.iter().enumerate() {
            assert_eq!(i, lower.category().index());
            for higher in &scores[i + 1..] {
                assert!(lower < higher, "{:?} should lose to {:?}", lower, higher);
            }
        }
    }

    #[test]
    fn test_kickers_break_ties() {
        assert!(score("AdAc9d8cTs") > score("AhAs9h8h7s"));
        assert!(score("KdKcKsQhJs") > score("KhKsKdQc9s"));
        assert!(score("9d9c9s9hAs") > score("9d9c9s9hKs"));
        assert!(score("AdAcAs2h2s") < score("AdAcAs3h3s"));
        assert!(score("KdKcKsAhAs") < score("AdAcAs2h2s"));
        assert!(score("QdQc5s5h9s") < score("QdQc6s6h2s"));
    }

    #[test]
    fn test_ties_are_equal() {
        assert_eq!(score("AdKc9s8h2s"), score("AhKs9d8c2d"));
        assert_eq!(score("2h4h6h8hTh"), score("2c4c6c8cTc"));
    }

    #[test]
    fn test_seven_cards_best_five() {
        // Board makes a straight, hole cards make a flush.
        let s = score("Ah9hTc Jh Qd Kh 2h");
        assert_eq!(
            HandScore::Flush(packed(&[
                Value::Ace,
                Value::King,
                Value::Jack,
                Value::Nine,
                Value::Two
            ])),
            s
        );
        // Two trips become a full house with the higher trips on top.
        assert_eq!(
            HandScore::FullHouse(packed(&[Value::Eight, Value::Five])),
            score("8c8d8s5c5d5hAs")
        );
        // Three pairs only play the best two.
        assert_eq!(
            HandScore::TwoPair(packed(&[Value::King, Value::Queen, Value::Jack])),
            score("KcKdQsQc2d2hJs")
        );
    }

    #[test]
    fn test_six_cards() {
        assert_eq!(
            HandCategory::Straight,
            score("2c3s4h5s6d6c").category()
        );
        let six: [Card; 6] = cards_from_str("2c3s4h5s6d6c").unwrap().try_into().unwrap();
        assert_eq!(score("2c3s4h5s6d6c"), six.rank());
    }

    #[test]
    fn test_order_independent() {
        let mut cards = cards_from_str("7s2cKdQc9s5h3d").unwrap();
        let expected = evaluate(&cards).unwrap();
        for _ in 0..7 {
            cards.rotate_left(1);
            assert_eq!(expected, evaluate(&cards).unwrap());
        }
        cards.reverse();
        assert_eq!(expected, evaluate(&cards).unwrap());
    }

    #[test]
    fn test_no_pair_board_high_card() {
        let s = score("7s2cKdQc9s5h3d");
        assert_eq!(HandCategory::HighCard, s.category());
        assert_eq!(
            vec![Value::King, Value::Queen, Value::Nine, Value::Seven, Value::Five],
            s.values()
        );
    }

    #[test]
    fn test_evaluate_rejects() {
        let four = cards_from_str("AhKhQhJh").unwrap();
        assert_eq!(Err(EquityError::HandSize(4)), evaluate(&four));
        let eight = cards_from_str("AhKhQhJhTh9h8h7h").unwrap();
        assert_eq!(Err(EquityError::HandSize(8)), evaluate(&eight));
        let dup = cards_from_str("AhKhQhJhAh").unwrap();
        assert_eq!(
            Err(EquityError::DuplicateCard(Card::new(Value::Ace, Suit::Heart))),
            evaluate(&dup)
        );
    }

    #[test]
    fn test_values_round_trip() {
        let s = HandScore::TwoPair(packed(&[Value::Two, Value::Two, Value::Ace]));
        assert_eq!(vec![Value::Two, Value::Two, Value::Ace], s.values());
    }

    #[test]
    fn test_category_names() {
        for c in CATEGORIES_BEST_FIRST {
            assert_eq!(Some(c), HandCategory::from_name(c.name()));
        }
        assert_eq!("Three of a Kind", HandCategory::ThreeOfAKind.to_string());
        assert!(CATEGORIES_BEST_FIRST.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_best_is_max_over_all_subsets() {
        let mut deck: FlatDeck = Deck::default().into();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..500 {
            let mut hand = [Card::from(0u8); 7];
            hand.copy_from_slice(deck.shuffle_take(&mut rng, 7));

            let every_subset = CardIter::new(hand.to_vec(), 5)
                .map(|five| rank_five(&five))
                .max()
                .unwrap();
            assert_eq!(every_subset, hand.rank(), "{:?}", hand);

            let six: [Card; 6] = hand[..6].try_into().unwrap();
            let every_subset = CardIter::new(six.to_vec(), 5)
                .map(|five| rank_five(&five))
                .max()
                .unwrap();
            assert_eq!(every_subset, six.rank(), "{:?}", six);
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic]
    fn test_rank_repeated_card() {
        let ace = Card::new(Value::Ace, Suit::Spade);
        [ace; 5].rank();
    }
}
