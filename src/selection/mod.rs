//! # Selection
//!
//! A [`Selector`] turns a population into a lazy sequence of [`SelectionGroup`]s:
//! single members for mutation, pairs for mating. The sequence may be infinite and
//! may repeat members. Every call to [`Selector::select`] starts a fresh sequence.
//!
//! The runners never assume a sequence ends; they stop once their quota is met.
pub mod fittest;
pub mod roulette;
pub mod tournament;

use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::candidate::Candidate;
use crate::collection::Collection;
use crate::error::{GeneticError, Result};
use crate::fitness::{score_population, FitnessPolicy};
use crate::rng::RandomNumberGenerator;

pub use fittest::Fittest;
pub use roulette::Roulette;
pub use tournament::Tournament;

/// What a selection sequence will be used for.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    Mating,
    Mutation,
}

impl Purpose {
    /// Number of parents in each group drawn for this purpose.
    pub fn arity(self) -> usize {
        match self {
            Purpose::Mating => 2,
            Purpose::Mutation => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Purpose::Mating => "mating",
            Purpose::Mutation => "mutation",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = GeneticError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mating" => Ok(Purpose::Mating),
            "mutation" => Ok(Purpose::Mutation),
            other => Err(GeneticError::Configuration(format!(
                "Unknown selection purpose: {}",
                other
            ))),
        }
    }
}

/// The unit a selector yields. Members are borrowed from the selected population.
#[derive(Debug)]
pub enum SelectionGroup<'a, C> {
    Single(&'a C),
    Pair(&'a C, &'a C),
}

impl<'a, C> SelectionGroup<'a, C> {
    pub fn arity(&self) -> usize {
        match self {
            SelectionGroup::Single(_) => 1,
            SelectionGroup::Pair(..) => 2,
        }
    }

    pub fn parents(&self) -> Vec<&'a C> {
        match *self {
            SelectionGroup::Single(a) => vec![a],
            SelectionGroup::Pair(a, b) => vec![a, b],
        }
    }
}

impl<C> Clone for SelectionGroup<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for SelectionGroup<'_, C> {}

/// A lazy, possibly infinite selection sequence.
pub type Selection<'a, C> = Box<dyn Iterator<Item = SelectionGroup<'a, C>> + 'a>;

/// Produces selection sequences over a population.
///
/// Implementations must only yield members of `population` and must yield
/// [`SelectionGroup::Pair`]s for [`Purpose::Mating`] and
/// [`SelectionGroup::Single`]s for [`Purpose::Mutation`].
pub trait Selector<C: Candidate>: Debug + Send + Sync {
    /// Starts a new selection sequence.
    ///
    /// `rng` seeds the sequence; the returned iterator owns its own randomness.
    fn select<'a>(
        &self,
        population: &'a Collection<C>,
        purpose: Purpose,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Selection<'a, C>>;
}

impl<C: Candidate> Collection<C> {
    /// Starts a selection sequence over this collection.
    pub fn select<'a>(
        &'a self,
        selector: &dyn Selector<C>,
        purpose: Purpose,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Selection<'a, C>> {
        selector.select(self, purpose, rng)
    }
}

/// Scores the population and flips the sign when lower raw scores are better, so
/// that every selector can treat larger values as fitter.
pub(crate) fn oriented_scores<C, F>(
    population: &Collection<C>,
    policy: &F,
    parallel_threshold: usize,
    higher_is_better: bool,
) -> Result<Vec<f64>>
where
    C: Candidate,
    F: FitnessPolicy<C> + ?Sized,
{
    let scores = score_population(population, policy, parallel_threshold)?;
    if higher_is_better {
        Ok(scores)
    } else {
        Ok(scores.into_iter().map(|s| -s).collect())
    }
}

/// An empty selection sequence.
pub(crate) fn exhausted<'a, C>() -> Selection<'a, C> {
    Box::new(std::iter::empty())
}
