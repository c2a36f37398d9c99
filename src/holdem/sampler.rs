use rand::Rng;
use tracing::event;

use super::{EquityConfig, KnownState};
use crate::core::{Card, CardBitSet, CardIter, EquityError, FlatDeck, n_choose_k, remaining_deck};

/// One complete way the hand could finish.
///
/// Every card in a deal, the player's hole cards, the board and all
/// of the opponents' hole cards, is distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// The player's two hole cards.
    pub hole_cards: [Card; 2],
    /// The final five card board.
    pub board: [Card; 5],
    /// Two hole cards for each opponent.
    pub opponent_holes: Vec<[Card; 2]>,
}

impl Deal {
    fn seven(hole: &[Card; 2], board: &[Card; 5]) -> [Card; 7] {
        [
            hole[0], hole[1], board[0], board[1], board[2], board[3], board[4],
        ]
    }

    /// The player's hole cards plus the board.
    pub fn player_hand(&self) -> [Card; 7] {
        Self::seven(&self.hole_cards, &self.board)
    }

    /// Each opponent's hole cards plus the board.
    pub fn opponent_hands(&self) -> impl Iterator<Item = [Card; 7]> + '_ {
        self.opponent_holes
            .iter()
            .map(|hole| Self::seven(hole, &self.board))
    }

    /// Every card used by this deal, failing on the first one that
    /// shows up twice.
    pub fn cards(&self) -> Result<CardBitSet, EquityError> {
        CardBitSet::try_from_cards(
            self.hole_cards
                .iter()
                .chain(self.board.iter())
                .chain(self.opponent_holes.iter().flatten()),
        )
        .map_err(EquityError::DuplicateCard)
    }
}

/// How deals are produced for a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SamplingMode {
    /// Every distinct deal exactly once.
    Exact,
    /// A fixed number of uniformly random deals.
    MonteCarlo,
}

/// Number of distinct deals that complete a board needing
/// `board_needed` cards and give two hole cards to each of
/// `opponents` distinguishable opponents, out of `deck_len` unseen
/// cards.
///
/// `None` if the count doesn't fit in a u64.
pub fn deal_space(deck_len: usize, board_needed: usize, opponents: usize) -> Option<u64> {
    let mut left = deck_len.checked_sub(board_needed)?;
    let mut total = n_choose_k(deck_len, board_needed)?;
    for _ in 0..opponents {
        total = total.checked_mul(n_choose_k(left, 2)?)?;
        left = left.checked_sub(2)?;
    }
    Some(total)
}

/// Enumerate when the deal space is known and within the limit,
/// sample otherwise.
pub fn choose_mode(space: Option<u64>, config: &EquityConfig) -> SamplingMode {
    match space {
        Some(deals) if deals > 0 && deals <= config.enumeration_limit => SamplingMode::Exact,
        _ => SamplingMode::MonteCarlo,
    }
}

/// The parts of every deal that are already known.
#[derive(Debug, Clone)]
struct DealTemplate {
    hole_cards: [Card; 2],
    board: Vec<Card>,
    board_needed: usize,
    opponents: usize,
}

impl DealTemplate {
    fn from_known(known: &KnownState) -> Result<Self, EquityError> {
        let hole_cards: [Card; 2] = known
            .hole_cards()
            .try_into()
            .map_err(|_| EquityError::HoleCardCount(known.hole_cards().len()))?;
        Ok(Self {
            hole_cards,
            board: known.community_cards().to_vec(),
            board_needed: known.cards_to_come(),
            opponents: known.opponents().count(),
        })
    }

    /// Cards that have to come out of the deck for a single deal.
    fn cards_needed(&self) -> usize {
        self.board_needed + 2 * self.opponents
    }

    /// Finish a deal from the missing board cards followed by the
    /// opponents' hole cards, two each.
    fn deal(&self, board_rest: &[Card], holes: &[Card]) -> Deal {
        let mut board = [self.hole_cards[0]; 5];
        for (slot, card) in board
            .iter_mut()
            .zip(self.board.iter().chain(board_rest.iter()))
        {
            *slot = *card;
        }
        Deal {
            hole_cards: self.hole_cards,
            board,
            opponent_holes: holes.chunks_exact(2).map(|h| [h[0], h[1]]).collect(),
        }
    }
}

/// Walks every distinct deal: each board completion, and for each of
/// those every ordered way to hand two cards to each opponent.
///
/// The first level picks the missing board cards and every level
/// after that picks one opponent's hole cards from whatever the
/// earlier levels left.
#[derive(Debug, Clone)]
pub struct ExactDeals {
    template: DealTemplate,
    deck: Vec<Card>,
    levels: Vec<CardIter>,
    picks: Vec<Vec<Card>>,
    started: bool,
    done: bool,
}

impl ExactDeals {
    fn new(template: DealTemplate, deck: FlatDeck) -> Self {
        let depth = 1 + template.opponents;
        Self {
            template,
            deck: deck[..].to_vec(),
            levels: Vec::with_capacity(depth),
            picks: Vec::with_capacity(depth),
            started: false,
            done: false,
        }
    }

    fn depth(&self) -> usize {
        1 + self.template.opponents
    }

    fn level_size(&self, level: usize) -> usize {
        if level == 0 {
            self.template.board_needed
        } else {
            2
        }
    }

    /// Restart every level from `level` down with its first pick.
    fn fill_from(&mut self, level: usize) -> bool {
        self.levels.truncate(level);
        self.picks.truncate(level);
        for l in level..self.depth() {
            let used: CardBitSet = self.picks.iter().flatten().copied().collect();
            let available: Vec<Card> = self
                .deck
                .iter()
                .copied()
                .filter(|c| !used.contains(*c))
                .collect();
            let mut iter = CardIter::new(available, self.level_size(l));
            match iter.next() {
                Some(pick) => {
                    self.picks.push(pick);
                    self.levels.push(iter);
                }
                None => return false,
            }
        }
        true
    }

    /// Step the deepest level that still has picks left and restart
    /// everything below it.
    fn advance(&mut self) -> bool {
        let mut level = self.levels.len();
        while level > 0 {
            level -= 1;
            if let Some(pick) = self.levels[level].next() {
                self.picks[level] = pick;
                return self.fill_from(level + 1);
            }
        }
        false
    }
}

impl Iterator for ExactDeals {
    type Item = Deal;

    fn next(&mut self) -> Option<Deal> {
        if self.done {
            return None;
        }
        let more = if self.started {
            self.advance()
        } else {
            self.started = true;
            self.fill_from(0)
        };
        if !more {
            self.done = true;
            return None;
        }
        let holes: Vec<Card> = self.picks[1..].iter().flatten().copied().collect();
        Some(self.template.deal(&self.picks[0], &holes))
    }
}

/// A fixed number of random deals. Each one is a fresh shuffle of
/// the unseen cards, taking what is needed off the top.
#[derive(Debug)]
pub struct RandomDeals<'a, R: Rng + ?Sized> {
    template: DealTemplate,
    deck: FlatDeck,
    rng: &'a mut R,
    remaining: usize,
}

impl<'a, R: Rng + ?Sized> RandomDeals<'a, R> {
    fn new(template: DealTemplate, deck: FlatDeck, rng: &'a mut R, trials: usize) -> Self {
        Self {
            template,
            deck,
            rng,
            remaining: trials,
        }
    }
}

impl<R: Rng + ?Sized> Iterator for RandomDeals<'_, R> {
    type Item = Deal;

    fn next(&mut self) -> Option<Deal> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let needed = self.template.cards_needed();
        let drawn = self.deck.shuffle_take(&mut *self.rng, needed);
        let (board_rest, holes) = drawn.split_at(self.template.board_needed);
        Some(self.template.deal(board_rest, holes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// The deals for one computation, either every one of them or a
/// random sample.
#[derive(Debug)]
pub enum Deals<'a, R: Rng + ?Sized> {
    Exact(ExactDeals),
    MonteCarlo(RandomDeals<'a, R>),
}

impl<R: Rng + ?Sized> Deals<'_, R> {
    pub fn mode(&self) -> SamplingMode {
        match self {
            Deals::Exact(_) => SamplingMode::Exact,
            Deals::MonteCarlo(_) => SamplingMode::MonteCarlo,
        }
    }
}

impl<R: Rng + ?Sized> Iterator for Deals<'_, R> {
    type Item = Deal;

    fn next(&mut self) -> Option<Deal> {
        match self {
            Deals::Exact(deals) => deals.next(),
            Deals::MonteCarlo(deals) => deals.next(),
        }
    }
}

/// Produce the deals that finish `known`.
///
/// If the number of distinct deals is within
/// `config.enumeration_limit` every deal is produced once, which
/// gives exact probabilities. Otherwise `config.trial_budget` random
/// deals are drawn with `rng`. The same seed always gives the same
/// deals.
///
/// The player must have both hole cards.
pub fn sample<'a, R: Rng + ?Sized>(
    known: &KnownState,
    config: &EquityConfig,
    rng: &'a mut R,
) -> Result<Deals<'a, R>, EquityError> {
    config.validate()?;
    let template = DealTemplate::from_known(known)?;
    let known_cards: Vec<Card> = known.known_cards().copied().collect();
    let deck = remaining_deck(&known_cards)?;
    deals_from(template, deck, config, rng)
}

fn deals_from<'a, R: Rng + ?Sized>(
    template: DealTemplate,
    deck: FlatDeck,
    config: &EquityConfig,
    rng: &'a mut R,
) -> Result<Deals<'a, R>, EquityError> {
    let needed = template.cards_needed();
    if needed > deck.len() {
        return Err(EquityError::InsufficientCards {
            needed,
            available: deck.len(),
        });
    }

    let space = deal_space(deck.len(), template.board_needed, template.opponents);
    match choose_mode(space, config) {
        SamplingMode::Exact => Ok(Deals::Exact(ExactDeals::new(template, deck))),
        SamplingMode::MonteCarlo => {
            event!(
                tracing::Level::TRACE,
                ?space,
                limit = config.enumeration_limit,
                trials = config.trial_budget,
                "Deal space too large to enumerate, sampling"
            );
            Ok(Deals::MonteCarlo(RandomDeals::new(
                template,
                deck,
                rng,
                config.trial_budget,
            )))
        }
    }
}
