use std::fmt;

use crate::candidate::Candidate;
use crate::collection::Collection;
use crate::error::{GeneticError, Result};
use crate::fitness::{FitnessPolicy, DEFAULT_PARALLEL_THRESHOLD};
use crate::rng::RandomNumberGenerator;

use super::{exhausted, oriented_scores, Purpose, Selection, SelectionGroup, Selector};

/// Tournament selection with replacement.
///
/// Each draw runs a tournament among `size` uniformly drawn members and yields the
/// fittest of them. The sequence never ends.
///
/// Tournament selection provides a balance between exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best members)
///
/// For mating the second tournament excludes the winner of the first.
#[derive(Clone)]
pub struct Tournament<F> {
    policy: F,
    size: usize,
    higher_is_better: bool,
    parallel_threshold: usize,
}

impl<F> Tournament<F> {
    /// Creates a tournament selector.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is 0.
    pub fn new(policy: F, size: usize) -> Result<Self> {
        if size < 1 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            policy,
            size,
            higher_is_better: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    pub fn with_lower_is_better(mut self) -> Self {
        self.higher_is_better = false;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<F> fmt::Debug for Tournament<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tournament")
            .field("size", &self.size)
            .field("higher_is_better", &self.higher_is_better)
            .field("parallel_threshold", &self.parallel_threshold)
            .finish()
    }
}

/// Runs a single tournament and returns the index of the winner.
fn run_tournament(
    scores: &[f64],
    size: usize,
    excluded: Option<usize>,
    rng: &mut RandomNumberGenerator,
) -> Option<usize> {
    let draw = |rng: &mut RandomNumberGenerator| match excluded {
        Some(skip) => rng.pick_index_except(scores.len(), skip),
        None => rng.pick_index(scores.len()),
    };

    let mut best = draw(rng)?;
    for _ in 1..size {
        let challenger = draw(rng)?;
        if scores[challenger] > scores[best] {
            best = challenger;
        }
    }
    Some(best)
}

impl<C, F> Selector<C> for Tournament<F>
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

        let scores = oriented_scores(
            population,
            &self.policy,
            self.parallel_threshold,
            self.higher_is_better,
        )?;
        let size = self.size;
        let mut rng = rng.fork();

        let sequence = std::iter::from_fn(move || match purpose {
            Purpose::Mutation => {
                let i = run_tournament(&scores, size, None, &mut rng)?;
                Some(SelectionGroup::Single(&population[i]))
            }
            Purpose::Mating => {
                let i = run_tournament(&scores, size, None, &mut rng)?;
                let j = run_tournament(&scores, size, Some(i), &mut rng)?;
                Some(SelectionGroup::Pair(&population[i], &population[j]))
            }
        });

        Ok(Box::new(sequence))
    }
}
