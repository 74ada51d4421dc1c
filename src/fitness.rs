//! # Fitness Policy
//!
//! How good a candidate is stays outside the engine. Selectors consult a
//! [`FitnessPolicy`] to rank or weight the members of a population; any
//! `Fn(&C) -> f64` closure qualifies.

use rayon::prelude::*;

use crate::candidate::Candidate;
use crate::collection::Collection;
use crate::error::{GeneticError, Result};

/// Populations at least this large are scored in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Scores a candidate. Higher is better.
pub trait FitnessPolicy<C: Candidate>: Send + Sync {
    fn score(&self, candidate: &C) -> f64;
}

impl<C, F> FitnessPolicy<C> for F
where
    C: Candidate,
    F: Fn(&C) -> f64 + Send + Sync,
{
    fn score(&self, candidate: &C) -> f64 {
        self(candidate)
    }
}

/// Scores every member of `population`, preserving member order.
///
/// # Errors
///
/// Returns `GeneticError::InvalidNumericValue` if any score is NaN or infinite.
pub fn score_population<C, F>(
    population: &Collection<C>,
    policy: &F,
    parallel_threshold: usize,
) -> Result<Vec<f64>>
where
    C: Candidate,
    F: FitnessPolicy<C> + ?Sized,
{
    let check = |candidate: &C| {
        let score = policy.score(candidate);
        if score.is_finite() {
            Ok(score)
        } else {
            Err(GeneticError::InvalidNumericValue(format!(
                "Non-finite fitness score {} for {}",
                score,
                candidate.artifact_path().display()
            )))
        }
    };

    if population.len() >= parallel_threshold {
        population.members().par_iter().map(check).collect()
    } else {
        population.iter().map(check).collect()
    }
}

/// Member positions ordered best-first. Ties keep population order.
pub fn rank_descending(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}
