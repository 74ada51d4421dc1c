//! # Operators
//!
//! Operators turn a [`SelectionGroup`] into offspring. Each purpose has a closed
//! set of registered operators, resolved from an [`OperatorSpec`] (a name plus a
//! parameter bag) when a run is configured. An unknown name or a malformed
//! parameter is reported at that point, never in the middle of a generation.
//!
//! | purpose  | name                 | parameters                         |
//! |----------|----------------------|------------------------------------|
//! | mating   | `component_exchange` |                                    |
//! | mutation | `random_substitute`  | `database`, `retain`               |
//! | mutation | `random_topology`    | `topologies` (comma-separated)     |
pub mod mating;
pub mod mutation;

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::str::FromStr;

use crate::candidate::Assembly;
use crate::error::{AttemptResult, GeneticError, Result};
use crate::naming::ArtifactNamer;
use crate::rng::RandomNumberGenerator;
use crate::selection::{Purpose, SelectionGroup};

pub use mating::MatingOperator;
pub use mutation::MutationOperator;

/// Keyword parameters of an operator, by name.
pub type ParamBag = BTreeMap<String, String>;

/// Names an operator and the parameters it should be invoked with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: ParamBag,
}

impl OperatorSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: ParamBag::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a parameter the operator cannot do without.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.param(key).ok_or_else(|| GeneticError::MissingParameter {
            operator: self.name.clone(),
            parameter: key.to_string(),
        })
    }

    /// Parses a required parameter.
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.require(key)?;
        raw.trim().parse().map_err(|e: T::Err| self.invalid(key, e))
    }

    /// Parses a required comma-separated list parameter.
    pub fn parse_list<T>(&self, key: &str) -> Result<Vec<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.require(key)?;
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| item.parse().map_err(|e: T::Err| self.invalid(key, e)))
            .collect()
    }

    fn invalid(&self, key: &str, reason: impl Display) -> GeneticError {
        GeneticError::InvalidParameter {
            operator: self.name.clone(),
            parameter: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Per-attempt state handed to an operator.
#[derive(Debug)]
pub struct AttemptContext<'r> {
    /// Call number of this attempt. Unique across the run.
    pub call: u64,
    pub namer: &'r ArtifactNamer,
    pub rng: &'r mut RandomNumberGenerator,
}

/// A registered recipe for producing offspring.
pub trait Operator<A: Assembly>: Debug + Clone + Send + Sync + Sized {
    /// The kind of selection group this operator consumes.
    const PURPOSE: Purpose;

    /// Names accepted by [`Operator::resolve`].
    const REGISTERED: &'static [&'static str];

    /// Looks up the operator named by `spec` and validates its parameters.
    ///
    /// # Errors
    ///
    /// `GeneticError::UnknownOperator` if the name is not registered for
    /// [`Operator::PURPOSE`]; `MissingParameter`/`InvalidParameter` if the
    /// parameter bag does not fit the operator.
    fn resolve(spec: &OperatorSpec) -> Result<Self>;

    /// The registered name of this operator.
    fn name(&self) -> &'static str;

    /// Performs one attempt. Never modifies the parents.
    fn apply(
        &self,
        group: SelectionGroup<'_, A>,
        ctx: &mut AttemptContext<'_>,
    ) -> AttemptResult<Vec<A>>;
}

fn unknown(purpose: Purpose, spec: &OperatorSpec) -> GeneticError {
    GeneticError::UnknownOperator {
        purpose: purpose.to_string(),
        name: spec.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_reports_missing_parameter() {
        let spec = OperatorSpec::new("random_substitute");
        match spec.require("database") {
            Err(GeneticError::MissingParameter { operator, parameter }) => {
                assert_eq!(operator, "random_substitute");
                assert_eq!(parameter, "database");
            }
            other => panic!("Expected MissingParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_and_parse_list() {
        let spec = OperatorSpec::new("op")
            .with_param("count", 3)
            .with_param("sizes", "1, 2,,4");

        assert_eq!(spec.parse::<u32>("count").unwrap(), 3);
        assert_eq!(spec.parse_list::<u32>("sizes").unwrap(), vec![1, 2, 4]);
        assert!(matches!(
            spec.with_param("count", "three").parse::<u32>("count"),
            Err(GeneticError::InvalidParameter { .. })
        ));
    }
}
