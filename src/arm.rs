//! Bernoulli arms with an O(1) running-mean estimator.

use crate::{Error, RandomSource, Result};

/// Result of one pull: a loss (`0`) or a win (`1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "u8", try_from = "u8"))]
pub enum Outcome {
    Loss,
    Win,
}

impl Outcome {
    pub fn from_win(win: bool) -> Self {
        if win {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    pub fn is_win(self) -> bool {
        self == Outcome::Win
    }

    /// Numeric reward: `1.0` for a win, `0.0` for a loss.
    pub fn reward(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
        }
    }
}

impl From<Outcome> for u8 {
    fn from(o: Outcome) -> u8 {
        match o {
            Outcome::Win => 1,
            Outcome::Loss => 0,
        }
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(x: u8) -> std::result::Result<Self, Self::Error> {
        match x {
            0 => Ok(Outcome::Loss),
            1 => Ok(Outcome::Win),
            other => Err(format!("outcome must be 0 or 1, got {other}")),
        }
    }
}

/// One reward source.
///
/// `true_probability` is simulation-only: the policy never reads it, it only
/// sees [`Arm::estimate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arm {
    true_probability: f64,
    estimate: f64,
    sample_count: u64,
}

impl Arm {
    /// Create an arm with no observations. `true_probability` must be in `[0, 1]`.
    pub fn new(true_probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&true_probability) {
            return Err(Error::ProbabilityOutOfRange(true_probability));
        }
        Ok(Self {
            true_probability,
            estimate: 0.0,
            sample_count: 0,
        })
    }

    pub fn true_probability(&self) -> f64 {
        self.true_probability
    }

    /// Mean of all outcomes observed so far (`0.0` before the first).
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Pull the arm: a win iff a uniform `[0, 1)` draw falls below `true_probability`.
    ///
    /// Does not update the estimate; call [`Arm::update`] with the result.
    pub fn draw<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Outcome {
        Outcome::from_win(rng.next_unit() < self.true_probability)
    }

    /// Fails if one more observation would overflow the sample counter.
    ///
    /// [`Arm::update`] succeeds whenever this does.
    pub fn check_capacity(&self) -> Result<()> {
        self.next_count().map(|_| ())
    }

    fn next_count(&self) -> Result<u64> {
        self.sample_count
            .checked_add(1)
            .ok_or(Error::Degenerate("arm sample count overflow"))
    }

    /// Fold one outcome into the running mean.
    ///
    /// `estimate' = (n * estimate + x) / (n + 1)`, then `n += 1`.
    pub fn update(&mut self, outcome: Outcome) -> Result<()> {
        let next = self.next_count()?;
        let n = self.sample_count as f64;
        self.estimate = (n * self.estimate + outcome.reward()) / (next as f64);
        self.sample_count = next;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn saturated(true_probability: f64) -> Self {
        Self {
            true_probability,
            estimate: 0.5,
            sample_count: u64::MAX,
        }
    }
}
