use std::fmt;

use crate::candidate::Candidate;
use crate::collection::Collection;
use crate::error::Result;
use crate::fitness::{rank_descending, FitnessPolicy, DEFAULT_PARALLEL_THRESHOLD};
use crate::rng::RandomNumberGenerator;

use super::{exhausted, oriented_scores, Purpose, Selection, SelectionGroup, Selector};

/// Best-first selection without repetition.
///
/// For mutation every member is yielded once, fittest first. For mating every
/// unordered pair is yielded once, ordered by the combined score of the pair. Both
/// sequences are finite, so a generation may end before its quota is met.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use assemblage::candidate::Candidate;
/// use assemblage::collection::Collection;
/// use assemblage::rng::RandomNumberGenerator;
/// use assemblage::selection::{Fittest, Purpose, SelectionGroup, Selector};
///
/// #[derive(Clone, Debug)]
/// struct Molecule { energy: i64, path: PathBuf }
///
/// impl Candidate for Molecule {
///     type Fingerprint = i64;
///     fn fingerprint(&self) -> i64 { self.energy }
///     fn artifact_path(&self) -> &Path { &self.path }
/// }
///
/// let population: Collection<Molecule> = [3, -7, 1]
///     .into_iter()
///     .map(|energy| Molecule { energy, path: PathBuf::from(format!("{energy}.mol")) })
///     .collect();
///
/// // Lower energy is better.
/// let selector = Fittest::new(|m: &Molecule| m.energy as f64).with_lower_is_better();
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let order: Vec<i64> = selector
///     .select(&population, Purpose::Mutation, &mut rng)
///     .unwrap()
///     .map(|group| match group {
///         SelectionGroup::Single(m) => m.energy,
///         SelectionGroup::Pair(..) => unreachable!(),
///     })
///     .collect();
/// assert_eq!(order, vec![-7, 1, 3]);
/// ```
#[derive(Clone)]
pub struct Fittest<F> {
    policy: F,
    higher_is_better: bool,
    parallel_threshold: usize,
}

impl<F> Fittest<F> {
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
}

impl<F> fmt::Debug for Fittest<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fittest")
            .field("higher_is_better", &self.higher_is_better)
            .field("parallel_threshold", &self.parallel_threshold)
            .finish()
    }
}

impl<C, F> Selector<C> for Fittest<F>
where
    C: Candidate,
    F: FitnessPolicy<C>,
{
    fn select<'a>(
        &self,
        population: &'a Collection<C>,
        purpose: Purpose,
        _rng: &mut RandomNumberGenerator,
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
        let ranked = rank_descending(&scores);

        match purpose {
            Purpose::Mutation => Ok(Box::new(
                ranked
                    .into_iter()
                    .map(move |i| SelectionGroup::Single(&population[i])),
            )),
            Purpose::Mating => {
                let mut pairs = Vec::with_capacity(ranked.len() * (ranked.len() - 1) / 2);
                for (a, &i) in ranked.iter().enumerate() {
                    for &j in &ranked[a + 1..] {
                        pairs.push((i, j));
                    }
                }
                // Stable, so equal sums keep the rank-major order built above.
                pairs.sort_by(|&(a1, b1), &(a2, b2)| {
                    (scores[a2] + scores[b2])
                        .partial_cmp(&(scores[a1] + scores[b1]))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                Ok(Box::new(
                    pairs
                        .into_iter()
                        .map(move |(i, j)| SelectionGroup::Pair(&population[i], &population[j])),
                ))
            }
        }
    }
}
