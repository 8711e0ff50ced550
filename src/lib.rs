//! `egreedy`: seedable ε-greedy bandit simulation.
//!
//! A set of Bernoulli arms with hidden win probabilities is pulled repeatedly
//! by an ε-greedy policy: with probability ε pick an arm uniformly at random
//! (explore), otherwise pick the arm with the best running estimate (exploit).
//! The exploration rate is either constant or decays linearly to zero.
//!
//! **Goals:**
//! - **Deterministic by default**: same config + same seed → identical reward log
//!   and estimates. All randomness flows through an explicit [`RandomSource`].
//! - **O(1) per arm**: estimates are running means; outcomes are never replayed.
//! - **No ambient state**: the exploration rate lives in a [`PolicyState`] owned
//!   by the [`Experiment`], so independent runs can execute side by side.
//!
//! **Pieces:**
//! - [`Arm`]: hidden win probability, running estimate, sample count.
//! - [`select_arm`] / [`EpsilonGreedy`]: the selection rule and its counters.
//! - [`ExplorationSchedule`]: constant or linear decay, floored at zero.
//! - [`Experiment`]: the round loop; [`ExperimentSummary`] is what it reports.
//! - [`run_repeated`]: Monte Carlo repetition with derived per-run seeds.
//!
//! ```rust
//! use egreedy::{Experiment, ExperimentConfig};
//!
//! let cfg = ExperimentConfig::default().with_rounds(5_000).with_seed(7);
//! let summary = Experiment::new(&cfg).unwrap().run().unwrap();
//! assert_eq!(summary.rounds(), 5_000);
//! assert_eq!(summary.explore_count + summary.exploit_count, 5_000);
//! ```
//!
//! **Non-goals:**
//! - Significance testing, plotting, and data ingestion. The summary exposes the
//!   reward log and cumulative win-rate series for external tools.

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod rng;
pub use rng::*;

mod seed;
pub use seed::*;

mod arm;
pub use arm::*;

mod decision;
pub use decision::*;

mod schedule;
pub use schedule::*;

mod policy;
pub use policy::*;

mod config;
pub use config::*;

mod report;
pub use report::*;

mod experiment;
pub use experiment::*;

mod repeat;
pub use repeat::*;
