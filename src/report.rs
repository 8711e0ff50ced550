//! Run results for downstream reporting.
//!
//! [`ExperimentSummary`] is the hand-off to whatever renders results: console
//! text via its `Display` impl, or the cumulative win-rate series an external
//! plotter draws against [`ExperimentSummary::best_true_probability`].

use crate::{DecisionCounts, Outcome};
use std::fmt;

/// Ordered per-round outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RewardLog {
    outcomes: Vec<Outcome>,
}

impl RewardLog {
    pub fn with_capacity(rounds: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(rounds),
        }
    }

    pub(crate) fn push(&mut self, o: Outcome) {
        self.outcomes.push(o);
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn as_slice(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Number of wins.
    pub fn total_reward(&self) -> f64 {
        self.outcomes.iter().filter(|o| o.is_win()).count() as f64
    }

    /// Overall win rate (`0.0` when empty).
    pub fn win_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            0.0
        } else {
            self.total_reward() / self.outcomes.len() as f64
        }
    }

    /// `cumsum(rewards)[i] / (i + 1)` for every round.
    pub fn cumulative_win_rate(&self) -> Vec<f64> {
        let mut wins = 0u64;
        self.outcomes
            .iter()
            .enumerate()
            .map(|(i, o)| {
                if o.is_win() {
                    wins += 1;
                }
                wins as f64 / (i + 1) as f64
            })
            .collect()
    }
}

/// Final (or partial, after an early stop) statistics of one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentSummary {
    pub per_arm_estimate: Vec<f64>,
    pub per_arm_samples: Vec<u64>,
    pub total_reward: f64,
    pub explore_count: u64,
    pub exploit_count: u64,
    pub optimal_count: u64,
    pub optimal_arm: usize,
    pub best_true_probability: f64,
    /// Exploration rate the next round would use.
    pub final_exploration_rate: f64,
    pub reward_log: RewardLog,
}

impl ExperimentSummary {
    pub fn rounds(&self) -> usize {
        self.reward_log.len()
    }

    pub fn win_rate(&self) -> f64 {
        self.reward_log.win_rate()
    }

    pub fn cumulative_win_rate(&self) -> Vec<f64> {
        self.reward_log.cumulative_win_rate()
    }

    pub fn counts(&self) -> DecisionCounts {
        DecisionCounts {
            explore: self.explore_count,
            exploit: self.exploit_count,
            optimal: self.optimal_count,
        }
    }

    /// Fraction of rounds that picked the optimal arm.
    pub fn optimal_fraction(&self) -> f64 {
        self.counts().optimal_fraction()
    }

    /// Expected-reward regret: `rounds * best_p - total_reward`.
    pub fn regret(&self) -> f64 {
        self.rounds() as f64 * self.best_true_probability - self.total_reward
    }
}

impl fmt::Display for ExperimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "optimal arm: {}", self.optimal_arm)?;
        for (i, (est, n)) in self
            .per_arm_estimate
            .iter()
            .zip(&self.per_arm_samples)
            .enumerate()
        {
            writeln!(f, "arm {i}: mean estimate {est:.4} ({n} samples)")?;
        }
        writeln!(f, "total reward earned: {}", self.total_reward)?;
        writeln!(f, "overall win rate: {:.4}", self.win_rate())?;
        writeln!(f, "times explored: {}", self.explore_count)?;
        writeln!(f, "times exploited: {}", self.exploit_count)?;
        write!(f, "times selected the optimal arm: {}", self.optimal_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::{Loss, Win};

    fn log(xs: &[Outcome]) -> RewardLog {
        let mut l = RewardLog::default();
        for &x in xs {
            l.push(x);
        }
        l
    }

    #[test]
    fn cumulative_win_rate_matches_running_ratio() {
        let l = log(&[Win, Loss, Win, Win]);
        assert_eq!(l.cumulative_win_rate(), vec![1.0, 0.5, 2.0 / 3.0, 0.75]);
        assert_eq!(l.total_reward(), 3.0);
        assert_eq!(l.win_rate(), 0.75);
    }

    #[test]
    fn empty_log_is_zero() {
        let l = RewardLog::default();
        assert!(l.is_empty());
        assert_eq!(l.win_rate(), 0.0);
        assert!(l.cumulative_win_rate().is_empty());
    }

    #[test]
    fn display_lists_every_arm() {
        let s = ExperimentSummary {
            per_arm_estimate: vec![0.2, 0.5],
            per_arm_samples: vec![10, 90],
            total_reward: 47.0,
            explore_count: 10,
            exploit_count: 90,
            optimal_count: 88,
            optimal_arm: 1,
            best_true_probability: 0.5,
            final_exploration_rate: 0.1,
            reward_log: RewardLog::default(),
        };
        let text = s.to_string();
        assert!(text.contains("arm 0: mean estimate 0.2000 (10 samples)"), "{text}");
        assert!(text.contains("arm 1:"), "{text}");
        assert!(text.contains("times selected the optimal arm: 88"), "{text}");
    }
}
