use super::Card;

/// Iterator over every `num_cards` sized combination of a set of
/// possible cards, in lexicographic order of position.
///
/// Asking for zero cards gives exactly one empty combination and
/// asking for more cards than there are gives nothing.
///
/// ```
/// use hand_equity::core::{CardIter, cards_from_str};
///
/// let cards = cards_from_str("AhKhQhJh").unwrap();
/// assert_eq!(6, CardIter::new(cards, 2).count());
/// ```
#[derive(Debug, Clone)]
pub struct CardIter {
    // All the possible cards that can be dealt
    possible_cards: Vec<Card>,

    // Set of current offsets being used to create card sets.
    idx: Vec<usize>,

    // Set when the first combination hasn't been handed out yet.
    fresh: bool,
    exhausted: bool,
}

impl CardIter {
    pub fn new(possible_cards: Vec<Card>, num_cards: usize) -> CardIter {
        let exhausted = num_cards > possible_cards.len();
        CardIter {
            possible_cards,
            idx: (0..num_cards).collect(),
            fresh: true,
            exhausted,
        }
    }

    /// Move the offsets to the next combination.
    /// Returns false when there isn't one.
    fn advance(&mut self) -> bool {
        let n = self.possible_cards.len();
        let k = self.idx.len();

        // Find the right most offset that still has room to move.
        let mut level = k;
        while level > 0 {
            level -= 1;
            if self.idx[level] < n - (k - level) {
                self.idx[level] += 1;
                // Everything after it restarts right behind it.
                for after in level + 1..k {
                    self.idx[after] = self.idx[after - 1] + 1;
                }
                return true;
            }
        }
        false
    }

    fn current(&self) -> Vec<Card> {
        self.idx.iter().map(|i| self.possible_cards[*i]).collect()
    }
}

impl Iterator for CardIter {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Vec<Card>> {
        if self.exhausted {
            return None;
        }
        if self.fresh {
            self.fresh = false;
        } else if !self.advance() {
            self.exhausted = true;
            return None;
        }
        Some(self.current())
    }
}

/// n choose k, or `None` if the result doesn't fit in a u64.
pub fn n_choose_k(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    let mut result: u64 = 1;
    for i in 0..k {
        // result * (n - i) is always divisible by (i + 1)
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardBitSet, Deck, FlatDeck, cards_from_str};

    #[test]
    fn test_iter_one() {
        let cards = cards_from_str("2s").unwrap();
        for combo in CardIter::new(cards.clone(), 1) {
            assert_eq!(1, combo.len());
        }
        assert_eq!(1, CardIter::new(cards.clone(), 1).count());
    }

    #[test]
    fn test_iter_two() {
        let cards = cards_from_str("2s3s4s").unwrap();

        // Make sure that we get the correct number back.
        assert_eq!(3, CardIter::new(cards.clone(), 2).count());

        // Make sure that everything has two cards and they are different.
        for combo in CardIter::new(cards.clone(), 2) {
            assert_eq!(2, combo.len());
            assert!(combo[0] != combo[1]);
        }
    }

    #[test]
    fn test_iter_zero() {
        let cards = cards_from_str("2s3s4s").unwrap();
        let all: Vec<Vec<Card>> = CardIter::new(cards.clone(), 0).collect();
        assert_eq!(vec![Vec::<Card>::new()], all);
        assert_eq!(1, CardIter::new(vec![], 0).count());
    }

    #[test]
    fn test_iter_too_many() {
        let cards = cards_from_str("2s3s").unwrap();
        assert_eq!(0, CardIter::new(cards.clone(), 3).count());
    }

    #[test]
    fn test_five_of_seven_unique() {
        let cards = cards_from_str("AhKhQhJhTh9h8h").unwrap();
        let combos: Vec<Vec<Card>> = CardIter::new(cards.clone(), 5).collect();
        assert_eq!(21, combos.len());
        for (i, a) in combos.iter().enumerate() {
            let set: CardBitSet = a.iter().copied().collect();
            assert_eq!(5, set.count());
            for b in &combos[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_iter_deck() {
        let d: FlatDeck = Deck::default().into();
        assert_eq!(1326, CardIter::new(d[..].to_vec(), 2).count());
        assert_eq!(22100, CardIter::new(d[..].to_vec(), 3).count());
    }

    #[test]
    fn test_n_choose_k() {
        assert_eq!(Some(2_598_960), n_choose_k(52, 5));
        assert_eq!(Some(1), n_choose_k(45, 0));
        assert_eq!(Some(990), n_choose_k(45, 2));
        assert_eq!(Some(0), n_choose_k(2, 3));
        for n in 0..12 {
            for k in 0..=n {
                let d: Vec<Card> = (0..n as u8).map(Card::from).collect();
                assert_eq!(
                    n_choose_k(n, k),
                    Some(CardIter::new(d.clone(), k).count() as u64)
                );
            }
        }
    }
}
