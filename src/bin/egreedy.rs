//! Command-line front end: run one experiment (or a batch) and print the summary.
//!
//! ```text
//! egreedy --probabilities 0.2,0.5,0.75 --rounds 100000 --epsilon 0.1
//! egreedy --decay-horizon 10000 --json
//! egreedy --repeat 20 --seed 3
//! ```

use anyhow::Context;
use clap::Parser;
use egreedy::{run_repeated, Experiment, ExperimentConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "egreedy")]
#[command(about = "Simulate an epsilon-greedy multi-armed bandit")]
#[command(version)]
struct Cli {
    /// True win probability of each arm, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [0.2, 0.5, 0.75])]
    probabilities: Vec<f64>,

    /// Number of rounds
    #[arg(long, default_value_t = 100_000, env = "EGREEDY_ROUNDS")]
    rounds: u64,

    /// Initial exploration rate
    #[arg(long, default_value_t = 0.1)]
    epsilon: f64,

    /// Rounds over which epsilon decays to zero ("none" keeps it constant)
    #[arg(long, default_value = "none", value_parser = parse_horizon)]
    decay_horizon: DecayHorizon,

    /// Seed for the random source
    #[arg(long, default_value_t = 0, env = "EGREEDY_SEED")]
    seed: u64,

    /// Repeat the experiment this many times with derived seeds
    #[arg(long)]
    repeat: Option<u64>,

    /// Print the summary as JSON (includes the cumulative win-rate series)
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Debug, Clone, Copy)]
struct DecayHorizon(Option<u64>);

fn parse_horizon(s: &str) -> Result<DecayHorizon, String> {
    if s.eq_ignore_ascii_case("none") {
        return Ok(DecayHorizon(None));
    }
    s.parse::<u64>()
        .map(|h| DecayHorizon(Some(h)))
        .map_err(|e| format!("expected a positive integer or \"none\": {e}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "egreedy=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = ExperimentConfig::default()
        .with_probabilities(cli.probabilities)
        .with_rounds(cli.rounds)
        .with_exploration_rate(cli.epsilon)
        .with_decay_horizon(cli.decay_horizon.0)
        .with_seed(cli.seed);

    if let Some(runs) = cli.repeat {
        let report = run_repeated(&cfg, runs).context("repeated experiment failed")?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("runs: {}", report.runs.len());
            println!("mean total reward: {:.2}", report.mean_total_reward());
            println!("std dev total reward: {:.2}", report.std_dev_total_reward());
            println!("mean win rate: {:.4}", report.mean_win_rate());
            println!("mean optimal fraction: {:.4}", report.mean_optimal_fraction());
        }
        return Ok(());
    }

    let mut experiment = Experiment::new(&cfg).context("invalid experiment configuration")?;
    info!(seed = cfg.seed, "running experiment");
    let summary = experiment.run().context("experiment aborted")?;

    if cli.json {
        let out = serde_json::json!({
            "summary": summary,
            "win_rate_curve": summary.cumulative_win_rate(),
            "reference_win_rate": summary.best_true_probability,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}
