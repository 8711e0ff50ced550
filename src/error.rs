//! Error taxonomy.
//!
//! Two classes: configuration errors, raised by [`ExperimentConfig::validate`][crate::ExperimentConfig::validate]
//! before any round runs, and [`Error::Degenerate`], which only a logic defect can produce
//! mid-run. Neither is retried; both abort the experiment.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("configuration error: no arms configured")]
    NoArms,

    #[error("configuration error: arm {index} has win probability {value}, expected a value in [0, 1]")]
    InvalidProbability { index: usize, value: f64 },

    #[error("configuration error: win probability {0} is outside [0, 1]")]
    ProbabilityOutOfRange(f64),

    #[error("configuration error: number of rounds must be positive")]
    ZeroRounds,

    #[error("configuration error: exploration rate {0} is outside [0, 1]")]
    InvalidExplorationRate(f64),

    #[error("configuration error: decay horizon must be positive when decay is enabled")]
    ZeroDecayHorizon,

    #[error("configuration error: repetition count must be positive")]
    ZeroRuns,

    #[error("degenerate numeric state: {0}")]
    Degenerate(&'static str),
}

impl Error {
    /// True for errors raised during setup (before round 1).
    pub fn is_config(&self) -> bool {
        !matches!(self, Error::Degenerate(_))
    }
}
