use std::ops::Index;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::event;

use super::{Deal, EquityConfig, KnownState, SamplingMode, sample};
use crate::core::{CATEGORIES_BEST_FIRST, EquityError, HandCategory, HandScore, Rankable};

/// Probability of finishing with each hand category.
///
/// Each deal counts once, in the best category it reached, so the
/// nine probabilities add up to one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryDistribution([f64; HandCategory::COUNT]);

impl CategoryDistribution {
    fn from_counts(counts: &[u64; HandCategory::COUNT], total: u64) -> Self {
        let mut probs = [0.0; HandCategory::COUNT];
        for (p, count) in probs.iter_mut().zip(counts.iter()) {
            *p = *count as f64 / total as f64;
        }
        Self(probs)
    }

    pub fn get(&self, category: HandCategory) -> f64 {
        self.0[category.index()]
    }

    /// Probability of `category` or anything better.
    ///
    /// ```
    /// use hand_equity::core::HandCategory;
    /// use hand_equity::holdem::{EquityConfig, KnownState, compute_equity};
    ///
    /// let known = KnownState::from_strs("AhAd", "", 1).unwrap();
    /// let config = EquityConfig::default().with_seed(7).with_trial_budget(1_000);
    /// let result = compute_equity(&known, &config).unwrap();
    ///
    /// // Pocket aces always finish with at least a pair.
    /// assert!((result.player.at_least(HandCategory::OnePair) - 1.0).abs() < 1e-9);
    /// ```
    pub fn at_least(&self, category: HandCategory) -> f64 {
        self.0[category.index()..].iter().sum()
    }

    /// Categories with their probability, best first.
    pub fn iter(&self) -> impl Iterator<Item = (HandCategory, f64)> + '_ {
        CATEGORIES_BEST_FIRST.iter().map(|c| (*c, self.get(*c)))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl Index<HandCategory> for CategoryDistribution {
    type Output = f64;

    fn index(&self, category: HandCategory) -> &f64 {
        &self.0[category.index()]
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CategoryDistribution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(HandCategory::COUNT))?;
        for (category, p) in self.iter() {
            map.serialize_entry(category.name(), &p)?;
        }
        map.end()
    }
}

/// Result of one equity computation. A snapshot; nothing refers
/// back to the engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EquityResult {
    /// Best category the player finishes with.
    #[cfg_attr(feature = "serde", serde(rename = "our_hand_probabilities"))]
    pub player: CategoryDistribution,
    /// Best category an arbitrary opponent finishes with.
    #[cfg_attr(feature = "serde", serde(rename = "opponent_hand_probabilities"))]
    pub opponent: CategoryDistribution,
    /// Player beats every opponent.
    #[cfg_attr(feature = "serde", serde(rename = "win_rate"))]
    pub win: f64,
    /// Player shares the best hand.
    #[cfg_attr(feature = "serde", serde(rename = "tie_rate"))]
    pub tie: f64,
    /// Some opponent has a better hand.
    #[cfg_attr(feature = "serde", serde(rename = "lose_rate"))]
    pub lose: f64,
    /// How many deals were tallied.
    pub deals: u64,
    /// True when every possible deal was tallied.
    pub exact: bool,
}

impl EquityResult {
    /// The player's share of the pot, counting a tie as half.
    pub fn equity(&self) -> f64 {
        self.win + self.tie / 2.0
    }
}

/// Running counts over deals.
#[derive(Debug, Clone, Default)]
pub struct EquityTally {
    player: [u64; HandCategory::COUNT],
    opponent: [u64; HandCategory::COUNT],
    win: u64,
    tie: u64,
    lose: u64,
    deals: u64,
    opponent_hands: u64,
}

impl EquityTally {
    /// Score one deal.
    pub fn record(&mut self, deal: &Deal) {
        let player = deal.player_hand().rank();
        self.player[player.category().index()] += 1;

        let mut best_opponent: Option<HandScore> = None;
        for hand in deal.opponent_hands() {
            let score = hand.rank();
            self.opponent[score.category().index()] += 1;
            self.opponent_hands += 1;
            best_opponent = best_opponent.max(Some(score));
        }

        match best_opponent.map(|best| player.cmp(&best)) {
            Some(std::cmp::Ordering::Less) => self.lose += 1,
            Some(std::cmp::Ordering::Equal) => self.tie += 1,
            // With nobody to beat the player wins.
            _ => self.win += 1,
        }
        self.deals += 1;
    }

    /// Normalize the counts into probabilities.
    pub fn finish(&self, exact: bool) -> Result<EquityResult, EquityError> {
        if self.deals == 0 || self.opponent_hands == 0 {
            return Err(EquityError::EmptySample);
        }
        let total = self.deals as f64;
        Ok(EquityResult {
            player: CategoryDistribution::from_counts(&self.player, self.deals),
            opponent: CategoryDistribution::from_counts(&self.opponent, self.opponent_hands),
            win: self.win as f64 / total,
            tie: self.tie as f64 / total,
            lose: self.lose as f64 / total,
            deals: self.deals,
            exact,
        })
    }
}

/// Tally every deal into an [`EquityResult`].
///
/// Each deal must belong to `known`: same hole cards, a board that
/// starts with the known community cards, one hand per opponent and
/// no card used twice. A deal that doesn't is rejected rather than
/// counted.
///
/// The result is marked as sampled; only [`compute_equity`] knows
/// whether its deals covered every possibility.
pub fn aggregate<I>(known: &KnownState, deals: I) -> Result<EquityResult, EquityError>
where
    I: IntoIterator<Item = Deal>,
{
    let mut tally = EquityTally::default();
    for deal in deals {
        check_deal(known, &deal)?;
        tally.record(&deal);
    }
    tally.finish(false)
}

fn check_deal(known: &KnownState, deal: &Deal) -> Result<(), EquityError> {
    if known.hole_cards() != &deal.hole_cards[..] {
        return Err(EquityError::DealShape("hole cards differ from the known ones"));
    }
    let on_board = known.community_cards();
    if on_board != &deal.board[..on_board.len()] {
        return Err(EquityError::DealShape("board doesn't start with the community cards"));
    }
    if deal.opponent_holes.len() != known.opponents().count() {
        return Err(EquityError::DealShape("wrong number of opponent hands"));
    }
    deal.cards().map(|_| ())
}

/// Compute the equity of `known`.
///
/// This is the single entry point meant to be called once per
/// update of the cards. It validates the state, deals the unseen
/// cards either exhaustively or by sampling and tallies the
/// results. Nothing is cached between calls.
///
/// With `config.rng_seed` set the result is reproducible; without
/// it a fresh generator is seeded from the operating system.
pub fn compute_equity(
    known: &KnownState,
    config: &EquityConfig,
) -> Result<EquityResult, EquityError> {
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    compute_equity_with_rng(known, config, &mut rng)
}

/// Same as [`compute_equity`] drawing from a caller owned generator.
/// `config.rng_seed` is ignored.
pub fn compute_equity_with_rng<R: Rng + ?Sized>(
    known: &KnownState,
    config: &EquityConfig,
    rng: &mut R,
) -> Result<EquityResult, EquityError> {
    let deals = sample(known, config, rng)?;
    let mode = deals.mode();
    event!(
        tracing::Level::DEBUG,
        ?mode,
        hole = ?known.hole_cards(),
        board = ?known.community_cards(),
        opponents = known.opponents().count(),
        trials = config.trial_budget,
        "Computing equity"
    );

    let mut result = aggregate(known, deals)?;
    result.exact = mode == SamplingMode::Exact;

    event!(
        tracing::Level::DEBUG,
        deals = result.deals,
        exact = result.exact,
        win = result.win,
        tie = result.tie,
        lose = result.lose,
        "Equity computed"
    );
    Ok(result)
}
