//! The experiment loop.
//!
//! [`Experiment`] owns every piece of per-run state: arms, policy counters,
//! exploration state, reward log, and the random source. One round is:
//!
//! ```text
//! decision = policy(estimates, rate)   // explore or exploit
//! outcome  = arms[decision.arm].draw()
//! arms[decision.arm].update(outcome)
//! log.push(outcome)
//! schedule.advance(state)              // after the round, never before
//! ```
//!
//! Nothing is shared between experiments, so independent runs (see
//! [`crate::run_repeated`]) need no coordination.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use crate::{
    Arm, Decision, DecisionCounts, EpsilonGreedy, Error, ExperimentConfig, ExperimentSummary,
    ExplorationSchedule, Outcome, PolicyState, RandomSource, Result, RewardLog, select_arm,
};

// Upper bound on the up-front reward-log reservation; longer runs grow it on demand.
const MAX_PREALLOC_ROUNDS: u64 = 1 << 20;

/// What happened in one round.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    /// Zero-based round index.
    pub round: u64,
    pub decision: Decision,
    pub outcome: Outcome,
    /// Exploration rate the decision was made with.
    pub exploration_rate: f64,
}

/// One ε-greedy simulation run.
#[derive(Debug, Clone)]
pub struct Experiment<R = StdRng> {
    arms: Vec<Arm>,
    estimates: Vec<f64>,
    policy: EpsilonGreedy,
    schedule: ExplorationSchedule,
    state: PolicyState,
    reward_log: RewardLog,
    num_rounds: u64,
    best_true_probability: f64,
    rng: R,
}

impl Experiment<StdRng> {
    /// Validate `cfg` and seed a [`StdRng`] from `cfg.seed`.
    pub fn new(cfg: &ExperimentConfig) -> Result<Self> {
        Self::with_source(cfg, StdRng::seed_from_u64(cfg.seed))
    }
}

impl<R: RandomSource> Experiment<R> {
    /// Validate `cfg` and draw all randomness from `rng` (`cfg.seed` is ignored).
    pub fn with_source(cfg: &ExperimentConfig, rng: R) -> Result<Self> {
        if let Err(e) = cfg.validate() {
            warn!(error = %e, "rejected experiment configuration");
            return Err(e);
        }
        let schedule = cfg.schedule()?;
        let optimal_arm = cfg.optimal_arm()?;
        let arms = cfg
            .true_probabilities
            .iter()
            .map(|&p| Arm::new(p))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            arms = arms.len(),
            rounds = cfg.num_rounds,
            exploration_rate = cfg.initial_exploration_rate,
            decay_horizon = ?cfg.decay_horizon,
            optimal_arm,
            "experiment configured"
        );

        Ok(Self {
            estimates: arms.iter().map(Arm::estimate).collect(),
            arms,
            policy: EpsilonGreedy::new(optimal_arm),
            schedule,
            state: PolicyState::new(cfg.initial_exploration_rate),
            reward_log: RewardLog::with_capacity(cfg.num_rounds.min(MAX_PREALLOC_ROUNDS) as usize),
            num_rounds: cfg.num_rounds,
            best_true_probability: cfg.best_true_probability(),
            rng,
        })
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn state(&self) -> &PolicyState {
        &self.state
    }

    pub fn counts(&self) -> DecisionCounts {
        self.policy.counts()
    }

    pub fn reward_log(&self) -> &RewardLog {
        &self.reward_log
    }

    pub fn optimal_arm(&self) -> usize {
        self.policy.optimal_arm()
    }

    pub fn rounds_completed(&self) -> u64 {
        self.state.round_index()
    }

    pub fn is_finished(&self) -> bool {
        self.rounds_completed() >= self.num_rounds
    }

    /// Run one round. Returns `Ok(None)` once all rounds are done.
    pub fn step(&mut self) -> Result<Option<RoundRecord>> {
        if self.is_finished() {
            return Ok(None);
        }
        let round = self.state.round_index();
        let rate = self.state.exploration_rate();

        let decision = select_arm(&self.estimates, rate, &mut self.rng)
            .ok_or(Error::Degenerate("policy returned no arm"))?;
        let arm = self
            .arms
            .get_mut(decision.arm)
            .ok_or(Error::Degenerate("policy chose an arm out of range"))?;
        // Recording starts after this; the rest of the round cannot fail.
        arm.check_capacity()?;

        self.policy.record(decision);
        let outcome = arm.draw(&mut self.rng);
        arm.update(outcome)?;
        self.reward_log.push(outcome);
        self.estimates[decision.arm] = arm.estimate();

        self.schedule.advance(&mut self.state);

        trace!(
            round,
            arm = decision.arm,
            explore = decision.is_explore(),
            win = outcome.is_win(),
            exploration_rate = rate,
            "round"
        );

        Ok(Some(RoundRecord {
            round,
            decision,
            outcome,
            exploration_rate: rate,
        }))
    }

    /// Run every remaining round.
    pub fn run(&mut self) -> Result<ExperimentSummary> {
        self.run_until(|_| false)
    }

    /// Run remaining rounds, checking `stop(rounds_completed)` before each one.
    ///
    /// When `stop` returns true the run ends there and the summary covers the
    /// completed rounds only. A defect mid-round aborts with the error; the
    /// partially updated state must not be reported.
    pub fn run_until<F>(&mut self, mut stop: F) -> Result<ExperimentSummary>
    where
        F: FnMut(u64) -> bool,
    {
        while !self.is_finished() {
            if stop(self.rounds_completed()) {
                debug!(
                    rounds_completed = self.rounds_completed(),
                    rounds_planned = self.num_rounds,
                    "experiment stopped early"
                );
                break;
            }
            self.step()?;
        }

        let summary = self.summary();
        info!(
            rounds = summary.rounds(),
            total_reward = summary.total_reward,
            win_rate = summary.win_rate(),
            explored = summary.explore_count,
            exploited = summary.exploit_count,
            optimal = summary.optimal_count,
            "experiment finished"
        );
        Ok(summary)
    }

    /// Snapshot of the current statistics.
    pub fn summary(&self) -> ExperimentSummary {
        let counts = self.policy.counts();
        ExperimentSummary {
            per_arm_estimate: self.estimates.clone(),
            per_arm_samples: self.arms.iter().map(Arm::sample_count).collect(),
            total_reward: self.reward_log.total_reward(),
            explore_count: counts.explore,
            exploit_count: counts.exploit,
            optimal_count: counts.optimal,
            optimal_arm: self.policy.optimal_arm(),
            best_true_probability: self.best_true_probability,
            final_exploration_rate: self.state.exploration_rate(),
            reward_log: self.reward_log.clone(),
        }
    }
}

/// Validate `cfg`, run it to completion with its seed, and return the summary.
pub fn run_experiment(cfg: &ExperimentConfig) -> Result<ExperimentSummary> {
    Experiment::new(cfg)?.run()
}
