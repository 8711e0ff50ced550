//! Decaying-ε run: exploration falls linearly from 0.1 to zero over the horizon.
//!
//! Same arms and round count as `epsilon_greedy`; after round 10 000 every
//! decision exploits, so the explore count stops growing.
//!
//! Run with:
//!   cargo run --example decaying_epsilon_greedy

use egreedy::{Experiment, ExperimentConfig};

const HORIZON: u64 = 10_000;

fn main() -> Result<(), egreedy::Error> {
    let cfg = ExperimentConfig::decaying(HORIZON)
        .with_probabilities(vec![0.2, 0.5, 0.75])
        .with_rounds(100_000)
        .with_exploration_rate(0.1);

    let mut experiment = Experiment::new(&cfg)?;
    let at_horizon = experiment.run_until(|done| done >= HORIZON)?;
    println!(
        "after {HORIZON} rounds: explored {} times, rate now {}",
        at_horizon.explore_count, at_horizon.final_exploration_rate
    );

    let summary = experiment.run()?;
    println!("{summary}");
    Ok(())
}
