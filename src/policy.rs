//! ε-greedy arm selection.
//!
//! [`select_arm`] is the pure rule: one uniform draw against the exploration
//! rate picks the branch; exploring consumes one more draw for a uniform index,
//! exploiting takes the first arm with the highest estimate. Given the same
//! estimates, rate, and draws it always returns the same [`Decision`].
//!
//! [`EpsilonGreedy`] wraps the rule with the run's [`DecisionCounts`].

use crate::{Decision, DecisionCounts, PolicyState, RandomSource};

/// Index of the maximum estimate; ties go to the lowest index.
///
/// NaN estimates never win. Returns `None` for an empty slice.
pub fn argmax_first(estimates: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in estimates.iter().enumerate() {
        if x.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if x <= b => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
        .or_else(|| (!estimates.is_empty()).then_some(0))
}

/// Choose an arm from `estimates` with exploration probability `exploration_rate`.
///
/// Returns `None` only if `estimates` is empty (no draws are consumed then).
pub fn select_arm<R: RandomSource + ?Sized>(
    estimates: &[f64],
    exploration_rate: f64,
    rng: &mut R,
) -> Option<Decision> {
    if estimates.is_empty() {
        return None;
    }
    if rng.next_unit() < exploration_rate {
        let i = rng.next_index(estimates.len());
        return Some(Decision::explore(i));
    }
    argmax_first(estimates).map(Decision::exploit)
}

/// Stateful ε-greedy policy for one run.
///
/// The optimal arm is fixed at construction from true probabilities (known only
/// to the simulation) and used for bookkeeping, never for selection.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    optimal_arm: usize,
    counts: DecisionCounts,
}

impl EpsilonGreedy {
    pub fn new(optimal_arm: usize) -> Self {
        Self {
            optimal_arm,
            counts: DecisionCounts::default(),
        }
    }

    pub fn optimal_arm(&self) -> usize {
        self.optimal_arm
    }

    pub fn counts(&self) -> DecisionCounts {
        self.counts
    }

    /// Decide with the current rate in `state` and record the decision.
    pub fn decide<R: RandomSource + ?Sized>(
        &mut self,
        estimates: &[f64],
        state: &PolicyState,
        rng: &mut R,
    ) -> Option<Decision> {
        let d = select_arm(estimates, state.exploration_rate(), rng)?;
        self.record(d);
        Some(d)
    }

    /// Count a decision made elsewhere with [`select_arm`].
    pub fn record(&mut self, decision: Decision) {
        self.counts.record(decision, self.optimal_arm);
    }
}
