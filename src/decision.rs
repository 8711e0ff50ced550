//! Decision records for the ε-greedy policy.
//!
//! A [`Decision`] says which arm was chosen and which branch chose it. Counters
//! over many decisions live in [`DecisionCounts`], which is what reports and
//! regression tests look at.

/// Which branch of the ε-greedy rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Branch {
    /// Uniformly random arm, independent of estimates.
    Explore,
    /// Arm with the highest current estimate (lowest index on ties).
    Exploit,
}

/// A single policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    /// Index of the chosen arm, in `[0, num_arms)`.
    pub arm: usize,
    pub branch: Branch,
}

impl Decision {
    pub fn explore(arm: usize) -> Self {
        Self {
            arm,
            branch: Branch::Explore,
        }
    }

    pub fn exploit(arm: usize) -> Self {
        Self {
            arm,
            branch: Branch::Exploit,
        }
    }

    pub fn is_explore(&self) -> bool {
        self.branch == Branch::Explore
    }
}

/// Tallies of decisions over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionCounts {
    pub explore: u64,
    pub exploit: u64,
    /// Decisions (from either branch) that picked the optimal arm.
    pub optimal: u64,
}

impl DecisionCounts {
    /// Count `d`; `optimal_arm` is the index with the highest true probability.
    pub fn record(&mut self, d: Decision, optimal_arm: usize) {
        match d.branch {
            Branch::Explore => self.explore += 1,
            Branch::Exploit => self.exploit += 1,
        }
        if d.arm == optimal_arm {
            self.optimal += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.explore + self.exploit
    }

    /// Fraction of decisions that explored (`0.0` before any decision).
    pub fn explore_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.explore as f64 / n as f64,
        }
    }

    /// Fraction of decisions that picked the optimal arm (`0.0` before any decision).
    pub fn optimal_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.optimal as f64 / n as f64,
        }
    }
}
