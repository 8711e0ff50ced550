//! Monte Carlo repetition.
//!
//! Runs the same configuration several times, each with its own
//! [`Experiment`] and its own random stream (seed derived from `cfg.seed` and
//! the run index), to estimate the spread of outcomes across seeds.

use tracing::debug;

use crate::{derive_seed, Error, Experiment, ExperimentConfig, ExperimentSummary, Result};

/// Upper bound on per-run storage reserved up front; larger batches grow as they go.
const MAX_PREALLOC_RUNS: u64 = 1 << 10;

fn prealloc_runs(runs: u64) -> usize {
    runs.min(MAX_PREALLOC_RUNS) as usize
}

/// Aggregate over repeated runs.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepetitionReport {
    /// Seed used by each run, in run order.
    pub seeds: Vec<u64>,
    pub runs: Vec<ExperimentSummary>,
}

impl RepetitionReport {
    pub fn mean_total_reward(&self) -> f64 {
        mean(self.runs.iter().map(|r| r.total_reward))
    }

    /// Sample standard deviation of total reward (`0.0` for fewer than two runs).
    pub fn std_dev_total_reward(&self) -> f64 {
        let n = self.runs.len();
        if n < 2 {
            return 0.0;
        }
        let m = self.mean_total_reward();
        let ss: f64 = self
            .runs
            .iter()
            .map(|r| (r.total_reward - m).powi(2))
            .sum();
        (ss / (n - 1) as f64).sqrt()
    }

    pub fn mean_optimal_fraction(&self) -> f64 {
        mean(self.runs.iter().map(ExperimentSummary::optimal_fraction))
    }

    pub fn mean_win_rate(&self) -> f64 {
        mean(self.runs.iter().map(ExperimentSummary::win_rate))
    }
}

fn mean(xs: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = xs.fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Run `cfg` `runs` times with independently seeded random sources.
///
/// Run `i` uses `derive_seed(cfg.seed, i)`, so the whole batch is reproducible
/// from `cfg.seed`.
pub fn run_repeated(cfg: &ExperimentConfig, runs: u64) -> Result<RepetitionReport> {
    if runs == 0 {
        return Err(Error::ZeroRuns);
    }
    cfg.validate()?;

    let mut seeds = Vec::with_capacity(prealloc_runs(runs));
    let mut summaries = Vec::with_capacity(prealloc_runs(runs));
    for i in 0..runs {
        let seed = derive_seed(cfg.seed, i);
        let run_cfg = cfg.clone().with_seed(seed);
        debug!(run = i, seed, "starting repetition");
        summaries.push(Experiment::new(&run_cfg)?.run()?);
        seeds.push(seed);
    }
    Ok(RepetitionReport {
        seeds,
        runs: summaries,
    })
}
