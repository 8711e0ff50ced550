//! Experiment configuration.
//!
//! Start from [`ExperimentConfig::default()`] (three arms at `0.2 / 0.5 / 0.75`,
//! 100 000 rounds, ε = 0.1, constant rate) and override with the `with_*`
//! builders. [`ExperimentConfig::validate`] runs before any round; every
//! invalid field is a configuration error.

use crate::{argmax_first, Error, ExplorationSchedule, Result};

/// Full configuration for one experiment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperimentConfig {
    /// True win probability per arm; the arm count is this list's length.
    pub true_probabilities: Vec<f64>,
    /// Rounds to run (must be positive).
    pub num_rounds: u64,
    /// Exploration rate for round 0, in `[0, 1]`.
    pub initial_exploration_rate: f64,
    /// Rounds over which the rate decays linearly to zero.
    ///
    /// `None` keeps the rate constant.
    pub decay_horizon: Option<u64>,
    /// Seed for the default random source.
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            true_probabilities: vec![0.2, 0.5, 0.75],
            num_rounds: 100_000,
            initial_exploration_rate: 0.1,
            decay_horizon: None,
            seed: 0,
        }
    }
}

impl ExperimentConfig {
    /// Default arms and rounds with the rate decaying to zero over `horizon` rounds.
    pub fn decaying(horizon: u64) -> Self {
        Self::default().with_decay_horizon(Some(horizon))
    }

    pub fn with_probabilities(mut self, true_probabilities: Vec<f64>) -> Self {
        self.true_probabilities = true_probabilities;
        self
    }

    pub fn with_rounds(mut self, num_rounds: u64) -> Self {
        self.num_rounds = num_rounds;
        self
    }

    pub fn with_exploration_rate(mut self, rate: f64) -> Self {
        self.initial_exploration_rate = rate;
        self
    }

    pub fn with_decay_horizon(mut self, horizon: Option<u64>) -> Self {
        self.decay_horizon = horizon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn num_arms(&self) -> usize {
        self.true_probabilities.len()
    }

    /// Check every field. Errors name the first offending value.
    pub fn validate(&self) -> Result<()> {
        if self.true_probabilities.is_empty() {
            return Err(Error::NoArms);
        }
        for (index, &value) in self.true_probabilities.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidProbability { index, value });
            }
        }
        if self.num_rounds == 0 {
            return Err(Error::ZeroRounds);
        }
        if !(0.0..=1.0).contains(&self.initial_exploration_rate) {
            return Err(Error::InvalidExplorationRate(self.initial_exploration_rate));
        }
        self.schedule().map(|_| ())
    }

    /// The exploration schedule implied by `decay_horizon`.
    pub fn schedule(&self) -> Result<ExplorationSchedule> {
        ExplorationSchedule::from_horizon(self.decay_horizon).ok_or(Error::ZeroDecayHorizon)
    }

    /// First arm with the highest true probability.
    pub fn optimal_arm(&self) -> Result<usize> {
        argmax_first(&self.true_probabilities).ok_or(Error::NoArms)
    }

    /// Highest true win probability (the reference line for win-rate curves).
    pub fn best_true_probability(&self) -> f64 {
        self.true_probabilities
            .iter()
            .copied()
            .fold(0.0, f64::max)
    }
}
