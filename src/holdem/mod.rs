/// Module for `KnownState` that holds the cards seen so far.
mod known_state;
/// Export `KnownState` and `Opponents`
pub use self::known_state::{KnownState, Opponents};

/// Knobs for a single computation.
mod config;
pub use self::config::{
    DEFAULT_ENUMERATION_LIMIT, DEFAULT_TRIAL_BUDGET, EquityConfig, MAX_ENUMERATION_LIMIT,
    MAX_TRIAL_BUDGET,
};

/// Module that deals out the unseen cards, every way or at random.
mod sampler;
/// Export the deals and the strategy that picks between them.
pub use self::sampler::{
    Deal, Deals, ExactDeals, RandomDeals, SamplingMode, choose_mode, deal_space, sample,
};

/// Tallying deals into probabilities.
mod equity;
pub use self::equity::{
    CategoryDistribution, EquityResult, EquityTally, aggregate, compute_equity,
    compute_equity_with_rng,
};
