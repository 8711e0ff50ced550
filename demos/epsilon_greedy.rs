//! Constant-ε run over three arms.
//!
//! 100 000 rounds against win probabilities `[0.2, 0.5, 0.75]` with ε = 0.1.
//! Prints the console summary and a few points of the cumulative win-rate curve.
//!
//! Run with:
//!   cargo run --example epsilon_greedy

use egreedy::{Experiment, ExperimentConfig};

fn main() -> Result<(), egreedy::Error> {
    let cfg = ExperimentConfig::default()
        .with_probabilities(vec![0.2, 0.5, 0.75])
        .with_rounds(100_000)
        .with_exploration_rate(0.1);

    let summary = Experiment::new(&cfg)?.run()?;
    println!("{summary}");

    let curve = summary.cumulative_win_rate();
    for round in [100, 1_000, 10_000, 100_000] {
        if let Some(rate) = curve.get(round - 1) {
            println!("cumulative win rate after {round:>6} rounds: {rate:.4}");
        }
    }
    println!("reference (best arm): {:.4}", summary.best_true_probability);
    Ok(())
}
