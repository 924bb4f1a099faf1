//! Points scored by a shooter in one quarter, by simulation.
//!
//! A quarter is split into fixed intervals (20 × 30 s). In each interval the
//! shooter independently makes a three-pointer with probability `p_three` and a
//! two-pointer with probability `p_two`.
//!
//! Trials are split into fixed-size chunks evaluated in parallel. Each chunk owns
//! an RNG seeded from `seed + chunk_index`, so a given seed gives the same answer
//! no matter how rayon schedules the work.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Bernoulli;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{MathError, MathResult};

const CHUNK_TRIALS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotModel {
    pub intervals: usize,
    pub p_three: f64,
    pub p_two: f64,
}

impl Default for ShotModel {
    fn default() -> Self {
        Self {
            intervals: 20,
            p_three: 0.45,
            p_two: 0.55,
        }
    }
}

impl ShotModel {
    /// Closed-form expectation `intervals · (3·p3 + 2·p2)`.
    pub fn analytic_mean(&self) -> f64 {
        self.intervals as f64 * (3.0 * self.p_three + 2.0 * self.p_two)
    }

    fn distributions(&self) -> MathResult<(Bernoulli, Bernoulli)> {
        let three = Bernoulli::new(self.p_three).map_err(|e| {
            MathError::InvalidParameter(format!("three-point probability {}: {e}", self.p_three))
        })?;
        let two = Bernoulli::new(self.p_two).map_err(|e| {
            MathError::InvalidParameter(format!("two-point probability {}: {e}", self.p_two))
        })?;
        Ok((three, two))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub model: ShotModel,
    pub trials: usize,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            model: ShotModel::default(),
            trials: 10_000,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimSummary {
    pub trials: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
    pub analytic_mean: f64,
}

/// One realization of a quarter.
pub fn simulate_quarter<R: Rng + ?Sized>(
    rng: &mut R,
    intervals: usize,
    three: &Bernoulli,
    two: &Bernoulli,
) -> u32 {
    let mut points = 0;
    for _ in 0..intervals {
        if three.sample(rng) {
            points += 3;
        }
        if two.sample(rng) {
            points += 2;
        }
    }
    points
}

/// Per-trial point totals, in a deterministic order for the seed.
pub fn run_trials(config: &SimConfig) -> MathResult<Vec<u32>> {
    if config.trials == 0 {
        return Err(MathError::InvalidParameter("at least one trial is required".to_string()));
    }
    let (three, two) = config.model.distributions()?;
    let chunks = config.trials.div_ceil(CHUNK_TRIALS);
    tracing::debug!(trials = config.trials, chunks, seed = config.seed, "simulating quarters");

    let per_chunk: Vec<Vec<u32>> = (0..chunks)
        .into_par_iter()
        .map(|c| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(c as u64));
            let len = CHUNK_TRIALS.min(config.trials - c * CHUNK_TRIALS);
            (0..len)
                .map(|_| simulate_quarter(&mut rng, config.model.intervals, &three, &two))
                .collect()
        })
        .collect();

    Ok(per_chunk.concat())
}

/// Average points per quarter over `config.trials` simulated quarters.
pub fn expected_points(config: &SimConfig) -> MathResult<SimSummary> {
    let results = run_trials(config)?;
    let n = results.len() as f64;
    let mean = results.iter().map(|&p| p as f64).sum::<f64>() / n;
    let var = results
        .iter()
        .map(|&p| (p as f64 - mean).powi(2))
        .sum::<f64>()
        / n;

    Ok(SimSummary {
        trials: results.len(),
        mean,
        std_dev: var.sqrt(),
        min: results.iter().copied().min().unwrap_or(0),
        max: results.iter().copied().max().unwrap_or(0),
        analytic_mean: config.model.analytic_mean(),
    })
}
