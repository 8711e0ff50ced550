//! Seeded end-to-end scenarios: convergence, explore rate, decay, reproducibility.

use egreedy::{
    run_experiment, run_repeated, select_arm, Error, Experiment, ExperimentConfig,
    RandomSource,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn three_arms() -> ExperimentConfig {
    ExperimentConfig::default().with_probabilities(vec![0.2, 0.5, 0.75])
}

#[test]
fn explore_fraction_converges_to_epsilon() {
    let eps = 0.1;
    let mut rng = StdRng::seed_from_u64(2020);
    let estimates = [0.2, 0.5, 0.75];
    let n = 100_000;
    let explored = (0..n)
        .filter(|_| select_arm(&estimates, eps, &mut rng).unwrap().is_explore())
        .count();
    let observed = explored as f64 / n as f64;
    assert!((observed - eps).abs() < 0.01, "observed={observed}");
}

#[test]
fn experiment_explore_fraction_tracks_constant_epsilon() {
    let cfg = three_arms()
        .with_rounds(100_000)
        .with_exploration_rate(0.1)
        .with_seed(17);
    let s = run_experiment(&cfg).unwrap();
    let observed = s.explore_count as f64 / s.rounds() as f64;
    assert!((observed - 0.1).abs() < 0.01, "observed={observed}");
}

#[test]
fn picks_the_optimal_arm_most_of_the_time() {
    let cfg = three_arms()
        .with_rounds(100_000)
        .with_exploration_rate(0.1)
        .with_seed(9);
    let s = run_experiment(&cfg).unwrap();
    assert_eq!(s.optimal_arm, 2);
    let frac = s.optimal_count as f64 / 100_000.0;
    assert!(frac > 0.85, "optimal fraction {frac}");
    assert!((s.per_arm_estimate[2] - 0.75).abs() < 0.02, "{:?}", s.per_arm_estimate);
}

#[test]
fn same_seed_gives_identical_runs() {
    let cfg = three_arms().with_rounds(20_000).with_seed(0xC0FFEE);
    let a = run_experiment(&cfg).unwrap();
    let b = run_experiment(&cfg).unwrap();
    assert_eq!(a.reward_log, b.reward_log);
    for (x, y) in a.per_arm_estimate.iter().zip(&b.per_arm_estimate) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
    assert_eq!(a.counts(), b.counts());
}

#[test]
fn injected_source_matches_seeded_constructor() {
    let cfg = three_arms().with_rounds(5_000).with_seed(31);
    let a = Experiment::new(&cfg).unwrap().run().unwrap();
    let b = Experiment::with_source(&cfg, StdRng::seed_from_u64(31))
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seeds_diverge() {
    let a = run_experiment(&three_arms().with_rounds(5_000).with_seed(1)).unwrap();
    let b = run_experiment(&three_arms().with_rounds(5_000).with_seed(2)).unwrap();
    assert_ne!(a.reward_log, b.reward_log);
}

#[test]
fn decaying_epsilon_stops_exploring_after_horizon() {
    let cfg = ExperimentConfig::decaying(10_000)
        .with_rounds(100_000)
        .with_seed(4);
    let mut e = Experiment::new(&cfg).unwrap();
    let schedule = cfg.schedule().unwrap();
    assert!(schedule.rate_after(e.state(), 9_999) > 0.0);
    assert_eq!(schedule.rate_after(e.state(), 10_000), 0.0);

    let early = e.run_until(|done| done >= 10_000).unwrap();
    assert_eq!(early.final_exploration_rate, 0.0);
    assert_eq!(schedule.rate_after(e.state(), 1), 0.0);
    // Expected explores over the horizon: 0.1 * 10_000 / 2 = 500.
    assert!(
        (300..=700).contains(&early.explore_count),
        "explored {}",
        early.explore_count
    );

    let done = e.run().unwrap();
    assert_eq!(done.explore_count, early.explore_count, "no exploring after the horizon");
    assert_eq!(done.rounds(), 100_000);
}

#[test]
fn cumulative_win_rate_approaches_best_arm() {
    let s = run_experiment(&three_arms().with_rounds(50_000).with_seed(12)).unwrap();
    let curve = s.cumulative_win_rate();
    assert_eq!(curve.len(), 50_000);
    let last = *curve.last().unwrap();
    assert_eq!(last, s.win_rate());
    assert!(last < s.best_true_probability + 0.02);
    assert!(last > 0.65, "win rate {last}");
    assert!(s.regret() > 0.0);
}

#[test]
fn configuration_errors_abort_before_running() {
    let cases = [
        (three_arms().with_probabilities(vec![]), Error::NoArms),
        (three_arms().with_rounds(0), Error::ZeroRounds),
        (ExperimentConfig::decaying(0), Error::ZeroDecayHorizon),
    ];
    for (cfg, want) in cases {
        assert_eq!(run_experiment(&cfg).unwrap_err(), want);
    }
}

#[test]
fn single_arm_is_always_optimal() {
    let cfg = ExperimentConfig::default()
        .with_probabilities(vec![0.3])
        .with_rounds(1_000)
        .with_seed(8);
    let s = run_experiment(&cfg).unwrap();
    assert_eq!(s.optimal_count, 1_000);
    assert_eq!(s.per_arm_samples, vec![1_000]);
}

#[test]
fn repeated_runs_each_favor_the_best_arm() {
    let cfg = three_arms().with_rounds(20_000).with_seed(77);
    let r = run_repeated(&cfg, 8).unwrap();
    for run in &r.runs {
        assert!(run.optimal_fraction() > 0.8, "{}", run.optimal_fraction());
    }
    assert!(r.mean_win_rate() > 0.65);
}

#[test]
fn experiments_run_independently_on_threads() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            std::thread::spawn(move || {
                let cfg = three_arms().with_rounds(10_000).with_seed(seed);
                run_experiment(&cfg).unwrap()
            })
        })
        .collect();
    let threaded: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (seed, s) in threaded.iter().enumerate() {
        let cfg = three_arms().with_rounds(10_000).with_seed(seed as u64);
        assert_eq!(*s, run_experiment(&cfg).unwrap());
    }
}

struct CountingSource {
    inner: StdRng,
    units: u64,
}

impl RandomSource for CountingSource {
    fn next_unit(&mut self) -> f64 {
        self.units += 1;
        self.inner.next_unit()
    }

    fn next_index(&mut self, n: usize) -> usize {
        self.inner.next_index(n)
    }
}

#[test]
fn each_round_consumes_one_branch_draw_and_one_reward_draw() {
    let cfg = three_arms().with_rounds(1_000);
    let mut src = CountingSource {
        inner: StdRng::seed_from_u64(3),
        units: 0,
    };
    let s = Experiment::with_source(&cfg, &mut src).unwrap().run().unwrap();
    assert_eq!(s.rounds(), 1_000);
    assert_eq!(src.units, 2_000);
}
