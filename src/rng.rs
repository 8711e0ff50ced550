//! Random source capability.
//!
//! Every random draw in the crate goes through [`RandomSource`]; nothing calls a
//! thread-local or global RNG. Seeded [`StdRng`] is the default source, and
//! [`ScriptedSource`] replays fixed sequences so tests can pin the exact branch
//! and index of each decision.

use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;

/// Uniform draws consumed by the arms and the policy.
pub trait RandomSource {
    /// A uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// A uniform index in `[0, n)`. Returns `0` when `n == 0`.
    fn next_index(&mut self, n: usize) -> usize;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.random_range(0..n)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, n: usize) -> usize {
        (**self).next_index(n)
    }
}

/// Replays caller-supplied draws in order, cycling when a sequence runs out.
///
/// Unit draws are clamped into `[0, 1)`; index draws are reduced modulo `n`.
/// An empty sequence yields `0.0` / `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    units: VecDeque<f64>,
    indices: VecDeque<usize>,
    units_drawn: u64,
    indices_drawn: u64,
}

impl ScriptedSource {
    pub fn new(units: impl IntoIterator<Item = f64>, indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            units: units.into_iter().collect(),
            indices: indices.into_iter().collect(),
            units_drawn: 0,
            indices_drawn: 0,
        }
    }

    /// Only unit draws (indices default to `0`).
    pub fn units(units: impl IntoIterator<Item = f64>) -> Self {
        Self::new(units, std::iter::empty())
    }

    /// Number of `next_unit` calls served so far.
    pub fn units_drawn(&self) -> u64 {
        self.units_drawn
    }

    /// Number of `next_index` calls served so far.
    pub fn indices_drawn(&self) -> u64 {
        self.indices_drawn
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        self.units_drawn += 1;
        let Some(u) = self.units.pop_front() else {
            return 0.0;
        };
        self.units.push_back(u);
        if u.is_nan() {
            0.0
        } else {
            // Largest f64 strictly below 1.0.
            u.clamp(0.0, 1.0 - f64::EPSILON / 2.0)
        }
    }

    fn next_index(&mut self, n: usize) -> usize {
        self.indices_drawn += 1;
        let Some(i) = self.indices.pop_front() else {
            return 0;
        };
        self.indices.push_back(i);
        if n == 0 {
            0
        } else {
            i % n
        }
    }
}
