use crate::core::EquityError;

/// Monte Carlo trials used when nothing else is asked for.
///
/// Any probability estimated from `n` trials has a standard error of
/// at most `sqrt(0.25 / n)`; 10 000 trials keeps that at half a
/// percentage point.
pub const DEFAULT_TRIAL_BUDGET: usize = 10_000;

/// Largest number of distinct deals that will be enumerated exactly.
///
/// A river spot against one opponent is 990 deals, a turn spot
/// 45 540. A flop against one opponent (a little over a million)
/// goes to sampling.
pub const DEFAULT_ENUMERATION_LIMIT: u64 = 100_000;

/// Largest accepted trial budget. Sampling preflop against nine
/// opponents takes about a second at this many trials.
pub const MAX_TRIAL_BUDGET: usize = 100_000;

/// Largest accepted enumeration limit, around a second of exact
/// enumeration.
pub const MAX_ENUMERATION_LIMIT: u64 = 1_000_000;

/// How an equity computation should be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquityConfig {
    /// Number of random deals when the deal space is too large to
    /// enumerate.
    pub trial_budget: usize,
    /// Fixed seed for reproducible sampling. `None` seeds from the
    /// operating system on every call.
    pub rng_seed: Option<u64>,
    /// Enumerate exactly when there are at most this many distinct
    /// deals. Zero always samples.
    pub enumeration_limit: u64,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            trial_budget: DEFAULT_TRIAL_BUDGET,
            rng_seed: None,
            enumeration_limit: DEFAULT_ENUMERATION_LIMIT,
        }
    }
}

impl EquityConfig {
    pub fn with_trial_budget(mut self, trial_budget: usize) -> Self {
        self.trial_budget = trial_budget;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_enumeration_limit(mut self, enumeration_limit: u64) -> Self {
        self.enumeration_limit = enumeration_limit;
        self
    }

    /// Check the budgets. Both are capped so that a single call
    /// finishes well inside a one second scan cycle.
    pub fn validate(&self) -> Result<(), EquityError> {
        if self.trial_budget == 0 {
            return Err(EquityError::ZeroTrialBudget);
        }
        if self.trial_budget > MAX_TRIAL_BUDGET {
            return Err(EquityError::TrialBudgetTooLarge {
                budget: self.trial_budget,
                max: MAX_TRIAL_BUDGET,
            });
        }
        if self.enumeration_limit > MAX_ENUMERATION_LIMIT {
            return Err(EquityError::EnumerationLimitTooLarge {
                limit: self.enumeration_limit,
                max: MAX_ENUMERATION_LIMIT,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tolerance() {
        let config = EquityConfig::default();
        assert!(config.validate().is_ok());
        // One sigma of the worst case probability stays under a point.
        let standard_error = (0.25 / config.trial_budget as f64).sqrt();
        assert!(standard_error <= 0.01);
    }

    #[test]
    fn test_builders() {
        let config = EquityConfig::default()
            .with_seed(3)
            .with_trial_budget(50)
            .with_enumeration_limit(0);
        assert_eq!(Some(3), config.rng_seed);
        assert_eq!(50, config.trial_budget);
        assert_eq!(0, config.enumeration_limit);
    }

    #[test]
    fn test_zero_budget() {
        assert_eq!(
            Err(EquityError::ZeroTrialBudget),
            EquityConfig::default().with_trial_budget(0).validate()
        );
    }

    #[test]
    fn test_budgets_capped() {
        let at_max = EquityConfig::default()
            .with_trial_budget(MAX_TRIAL_BUDGET)
            .with_enumeration_limit(MAX_ENUMERATION_LIMIT);
        assert!(at_max.validate().is_ok());

        assert_eq!(
            Err(EquityError::TrialBudgetTooLarge {
                budget: 10_000_000,
                max: MAX_TRIAL_BUDGET
            }),
            at_max.with_trial_budget(10_000_000).validate()
        );
        assert_eq!(
            Err(EquityError::EnumerationLimitTooLarge {
                limit: u64::MAX,
                max: MAX_ENUMERATION_LIMIT
            }),
            at_max.with_enumeration_limit(u64::MAX).validate()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_config() {
        let config: EquityConfig = serde_json::from_str(r#"{"rng_seed": 9}"#).unwrap();
        assert_eq!(Some(9), config.rng_seed);
        assert_eq!(DEFAULT_TRIAL_BUDGET, config.trial_budget);
    }
}
