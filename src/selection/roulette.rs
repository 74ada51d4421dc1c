use std::fmt;

use crate::candidate::Candidate;
use crate::collection::Collection;
use crate::error::{GeneticError, Result};
use crate::fitness::{score_population, FitnessPolicy, DEFAULT_PARALLEL_THRESHOLD};
use crate::rng::RandomNumberGenerator;

use super::{exhausted, Purpose, Selection, SelectionGroup, Selector};

/// Fitness-proportionate selection with replacement.
///
/// Each draw picks a member with probability proportional to its weight. The
/// sequence never ends. For mating the second parent is drawn from the remaining
/// members, so a pair never holds the same candidate twice.
///
/// When lower scores are better, weights are obtained by inverting the scores
/// against the population maximum.
#[derive(Clone)]
pub struct Roulette<F> {
    policy: F,
    higher_is_better: bool,
    parallel_threshold: usize,
}

impl<F> Roulette<F> {
    pub fn new(policy: F) -> Self {
        Self {
            policy,
            higher_is_better: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_lower_is_better(mut self) -> Self {
        self.higher_is_better = false;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Turns raw scores into non-negative selection weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a weight would be negative or all weights are zero.
    fn weights(&self, scores: &[f64]) -> Result<Vec<f64>> {
        let weights: Vec<f64> = if self.higher_is_better {
            if scores.iter().any(|&s| s < 0.0) {
                return Err(GeneticError::Selection(
                    "Roulette selection requires non-negative fitness values".to_string(),
                ));
            }
            scores.to_vec()
        } else {
            let max = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            // Add 1.0 so that the worst member keeps a small chance.
            scores.iter().map(|&s| max + 1.0 - s).collect()
        };

        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(GeneticError::Selection(
                "Roulette selection requires at least one member with non-zero fitness"
                    .to_string(),
            ));
        }

        Ok(weights)
    }
}

impl<F> fmt::Debug for Roulette<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Roulette")
            .field("higher_is_better", &self.higher_is_better)
            .field("parallel_threshold", &self.parallel_threshold)
            .finish()
    }
}

/// Spins the wheel once, ignoring `excluded`.
///
/// Falls back to a uniform pick when the remaining members carry no weight.
fn spin(weights: &[f64], excluded: Option<usize>, rng: &mut RandomNumberGenerator) -> Option<usize> {
    let total: f64 = weights
        .iter()
        .enumerate()
        .filter(|&(i, _)| Some(i) != excluded)
        .map(|(_, &w)| w)
        .sum();

    if total <= 0.0 {
        return match excluded {
            Some(skip) => rng.pick_index_except(weights.len(), skip),
            None => rng.pick_index(weights.len()),
        };
    }

    let target = rng.uniform(0.0, total);
    let mut cumulative = 0.0;
    let mut last = None;
    for (i, &w) in weights.iter().enumerate() {
        if Some(i) == excluded || w <= 0.0 {
            continue;
        }
        cumulative += w;
        last = Some(i);
        if target < cumulative {
            return Some(i);
        }
    }
    // Floating-point shortfall lands on the last eligible slot.
    last
}

impl<C, F> Selector<C> for Roulette<F>
where
    C: Candidate,
    F: FitnessPolicy<C>,
{
    fn select<'a>(
        &self,
        population: &'a Collection<C>,
        purpose: Purpose,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Selection<'a, C>> {
        if population.len() < purpose.arity() {
            return Ok(exhausted());
        }

        let scores = score_population(population, &self.policy, self.parallel_threshold)?;
        let weights = self.weights(&scores)?;
        let mut rng = rng.fork();

        let sequence = std::iter::from_fn(move || match purpose {
            Purpose::Mutation => {
                let i = spin(&weights, None, &mut rng)?;
                Some(SelectionGroup::Single(&population[i]))
            }
            Purpose::Mating => {
                let i = spin(&weights, None, &mut rng)?;
                let j = spin(&weights, Some(i), &mut rng)?;
                Some(SelectionGroup::Pair(&population[i], &population[j]))
            }
        });

        Ok(Box::new(sequence))
    }
}
