//! Exploration-rate schedules.
//!
//! The exploration rate is explicit state ([`PolicyState`]) owned by whoever
//! drives the rounds. The schedule only knows how to advance it: call
//! [`ExplorationSchedule::advance`] once per round, after that round's pull and
//! estimator update, so round `i` decides with the rate decayed by rounds
//! `0..i` only.

use std::num::NonZeroU64;

/// How the exploration rate evolves over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExplorationSchedule {
    /// The rate never changes.
    #[default]
    Constant,
    /// The rate drops by `initial_rate / horizon` per round, floored at zero.
    ///
    /// After `horizon` rounds the rate is exactly `0.0`.
    LinearDecay { horizon: NonZeroU64 },
}

impl ExplorationSchedule {
    /// `None` means constant; `Some(0)` has no valid schedule.
    pub fn from_horizon(horizon: Option<u64>) -> Option<Self> {
        match horizon {
            None => Some(ExplorationSchedule::Constant),
            Some(h) => NonZeroU64::new(h).map(|horizon| ExplorationSchedule::LinearDecay { horizon }),
        }
    }

    /// Per-round decrement for a run that starts at `initial_rate`.
    pub fn step(&self, initial_rate: f64) -> f64 {
        match self {
            ExplorationSchedule::Constant => 0.0,
            ExplorationSchedule::LinearDecay { horizon } => initial_rate / horizon.get() as f64,
        }
    }

    /// Advance `state` past one completed round.
    pub fn advance(&self, state: &mut PolicyState) {
        state.round_index = state.round_index.saturating_add(1);
        let ExplorationSchedule::LinearDecay { horizon } = *self else {
            return;
        };
        state.decay_steps = state.decay_steps.saturating_add(1);
        if state.decay_steps >= horizon.get() {
            state.exploration_rate = 0.0;
        } else {
            let step = self.step(state.initial_rate);
            state.exploration_rate = (state.exploration_rate - step).max(0.0);
        }
    }

    /// The rate `state` would hold after `rounds` more rounds, without mutating it.
    pub fn rate_after(&self, state: &PolicyState, rounds: u64) -> f64 {
        let mut s = *state;
        for _ in 0..rounds {
            if s.exploration_rate == 0.0 || *self == ExplorationSchedule::Constant {
                break;
            }
            self.advance(&mut s);
        }
        s.exploration_rate
    }
}

/// Mutable exploration state for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolicyState {
    exploration_rate: f64,
    initial_rate: f64,
    round_index: u64,
    decay_steps: u64,
}

impl PolicyState {
    /// Start a run at `initial_rate` (negative or NaN inputs become `0.0`).
    pub fn new(initial_rate: f64) -> Self {
        let r = if initial_rate.is_finite() && initial_rate > 0.0 {
            initial_rate
        } else {
            0.0
        };
        Self {
            exploration_rate: r,
            initial_rate: r,
            round_index: 0,
            decay_steps: 0,
        }
    }

    /// Probability of exploring on the next decision. Always `>= 0`.
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn initial_rate(&self) -> f64 {
        self.initial_rate
    }

    /// Number of completed rounds.
    pub fn round_index(&self) -> u64 {
        self.round_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decay(h: u64) -> ExplorationSchedule {
        ExplorationSchedule::from_horizon(Some(h)).unwrap()
    }

    #[test]
    fn constant_rate_never_changes() {
        let mut s = PolicyState::new(0.1);
        for _ in 0..1_000 {
            ExplorationSchedule::Constant.advance(&mut s);
        }
        assert_eq!(s.exploration_rate(), 0.1);
        assert_eq!(s.round_index(), 1_000);
    }

    #[test]
    fn linear_decay_steps_by_initial_over_horizon() {
        let sched = decay(4);
        let mut s = PolicyState::new(0.4);
        sched.advance(&mut s);
        assert!((s.exploration_rate() - 0.3).abs() < 1e-12);
        sched.advance(&mut s);
        assert!((s.exploration_rate() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn linear_decay_hits_exact_zero_at_horizon_and_stays() {
        let sched = decay(10_000);
        let mut s = PolicyState::new(0.1);
        for round in 1..=10_000u64 {
            sched.advance(&mut s);
            assert!(s.exploration_rate() >= 0.0);
            if round < 10_000 {
                assert!(s.exploration_rate() > 0.0, "round={round}");
            }
        }
        assert_eq!(s.exploration_rate(), 0.0);
        for _ in 0..100 {
            sched.advance(&mut s);
            assert_eq!(s.exploration_rate(), 0.0);
        }
        assert_eq!(s.round_index(), 10_100);
    }

    #[test]
    fn rate_is_non_increasing_under_decay() {
        let sched = decay(7);
        let mut s = PolicyState::new(1.0);
        let mut prev = s.exploration_rate();
        for _ in 0..20 {
            sched.advance(&mut s);
            assert!(s.exploration_rate() <= prev);
            prev = s.exploration_rate();
        }
    }

    #[test]
    fn zero_horizon_has_no_schedule() {
        assert_eq!(ExplorationSchedule::from_horizon(Some(0)), None);
        assert_eq!(
            ExplorationSchedule::from_horizon(None),
            Some(ExplorationSchedule::Constant)
        );
    }

    #[test]
    fn negative_initial_rate_is_floored() {
        assert_eq!(PolicyState::new(-0.5).exploration_rate(), 0.0);
        assert_eq!(PolicyState::new(f64::NAN).exploration_rate(), 0.0);
    }

    #[test]
    fn rate_after_does_not_mutate() {
        let sched = decay(10);
        let s = PolicyState::new(0.5);
        assert_eq!(sched.rate_after(&s, 10), 0.0);
        assert!((sched.rate_after(&s, 5) - 0.25).abs() < 1e-12);
        assert_eq!(s.exploration_rate(), 0.5);
        assert_eq!(ExplorationSchedule::Constant.rate_after(&s, 99), 0.5);
    }
}
