//! Hand equity for Texas Hold'em.
//!
//! Given a player's hole cards, any community cards already on the
//! board and a number of opponents, this works out how likely the
//! player is to finish with each hand category and how often they
//! win, tie or lose at showdown.
//!
//! ```
//! use hand_equity::holdem::{EquityConfig, KnownState, compute_equity};
//!
//! let known = KnownState::from_strs("AhAd", "", 1).unwrap();
//! let config = EquityConfig::default().with_seed(42).with_trial_budget(2_000);
//! let result = compute_equity(&known, &config).unwrap();
//!
//! assert!(result.win > result.lose);
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// The holdem equity engine: known state, dealing and tallying.
pub mod holdem;
