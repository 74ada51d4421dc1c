//! # Run Configuration
//!
//! [`OperatorConfig`] binds a resolved operator to the number of successful
//! attempts a generation should perform, and carries the run-wide call counter the
//! operator's artifacts are named from.
//!
//! [`ToolBagOptions`] is the plain-data side of a run: which operators to use, how
//! many successes to aim for and where artifacts go. With the `serde` feature it can
//! be read from a configuration file.
//!
//! ## Example
//!
//! ```rust
//! use assemblage::evolution::options::ToolBagOptions;
//! use assemblage::operators::OperatorSpec;
//!
//! let options = ToolBagOptions::builder()
//!     .mating(OperatorSpec::new("component_exchange"), 10)
//!     .mutation(
//!         OperatorSpec::new("random_substitute")
//!             .with_param("database", "/data/blocks")
//!             .with_param("retain", "linker"),
//!         5,
//!     )
//!     .extension("mol")
//!     .seed(42)
//!     .build();
//!
//! assert_eq!(options.num_matings, 10);
//! assert_eq!(options.num_mutations, 5);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;

use crate::candidate::Assembly;
use crate::error::Result;
use crate::naming::{CallCounter, DEFAULT_EXTENSION};
use crate::operators::{MatingOperator, MutationOperator, Operator, OperatorSpec};

/// A resolved operator plus its per-generation quota.
pub struct OperatorConfig<A: Assembly, O: Operator<A>> {
    spec: OperatorSpec,
    operator: O,
    target_count: usize,
    calls: CallCounter,
    _marker: PhantomData<fn() -> A>,
}

pub type MatingConfig<A> = OperatorConfig<A, MatingOperator>;
pub type MutationConfig<A> = OperatorConfig<A, MutationOperator<A>>;

impl<A: Assembly, O: Operator<A>> OperatorConfig<A, O> {
    /// Resolves `spec` against the operators registered for `O`.
    ///
    /// # Errors
    ///
    /// Fails if the operator name is unknown or its parameters do not fit.
    pub fn new(spec: OperatorSpec, target_count: usize) -> Result<Self> {
        let operator = O::resolve(&spec)?;
        Ok(Self {
            spec,
            operator,
            target_count,
            calls: CallCounter::new(),
            _marker: PhantomData,
        })
    }

    /// Wraps an already constructed operator.
    pub fn from_operator(operator: O, target_count: usize) -> Self {
        Self {
            spec: OperatorSpec::new(operator.name()),
            operator,
            target_count,
            calls: CallCounter::new(),
            _marker: PhantomData,
        }
    }

    /// Continues numbering from an earlier run.
    pub fn with_call_counter(mut self, calls: CallCounter) -> Self {
        self.calls = calls;
        self
    }

    pub fn spec(&self) -> &OperatorSpec {
        &self.spec
    }

    pub fn operator(&self) -> &O {
        &self.operator
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn calls(&self) -> u64 {
        self.calls.calls()
    }

    pub fn call_counter(&self) -> CallCounter {
        self.calls
    }

    pub(crate) fn next_call(&mut self) -> u64 {
        self.calls.advance()
    }
}

impl<A: Assembly, O: Operator<A>> Clone for OperatorConfig<A, O> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            operator: self.operator.clone(),
            target_count: self.target_count,
            calls: self.calls,
            _marker: PhantomData,
        }
    }
}

impl<A: Assembly, O: Operator<A>> fmt::Debug for OperatorConfig<A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorConfig")
            .field("spec", &self.spec)
            .field("operator", &self.operator)
            .field("target_count", &self.target_count)
            .field("calls", &self.calls)
            .finish()
    }
}

/// Plain-data configuration of a [`ToolBag`](super::ToolBag).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ToolBagOptions {
    pub mating: Option<OperatorSpec>,
    pub num_matings: usize,
    pub mutation: Option<OperatorSpec>,
    pub num_mutations: usize,
    /// Where offspring artifacts are written. Defaults to the working directory.
    pub directory: Option<PathBuf>,
    pub extension: String,
    /// Seed for reproducible runs. Seeded from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for ToolBagOptions {
    fn default() -> Self {
        Self {
            mating: None,
            num_matings: 0,
            mutation: None,
            num_mutations: 0,
            directory: None,
            extension: DEFAULT_EXTENSION.to_string(),
            seed: None,
        }
    }
}

impl ToolBagOptions {
    pub fn builder() -> ToolBagOptionsBuilder {
        ToolBagOptionsBuilder::default()
    }
}

/// Builder for `ToolBagOptions`.
#[derive(Debug, Clone, Default)]
pub struct ToolBagOptionsBuilder {
    options: ToolBagOptions,
}

impl ToolBagOptionsBuilder {
    pub fn mating(mut self, spec: OperatorSpec, num_matings: usize) -> Self {
        self.options.mating = Some(spec);
        self.options.num_matings = num_matings;
        self
    }

    pub fn mutation(mut self, spec: OperatorSpec, num_mutations: usize) -> Self {
        self.options.mutation = Some(spec);
        self.options.num_mutations = num_mutations;
        self
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.options.directory = Some(directory.into());
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.options.extension = extension.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    pub fn build(self) -> ToolBagOptions {
        self.options
    }
}
