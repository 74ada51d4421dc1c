use std::fmt;
use std::path::PathBuf;

use super::{
    options::{MatingConfig, MutationConfig, ToolBagOptions},
    runner::{GenerationOutcome, Mating, Mutation},
};
use crate::{
    candidate::Assembly,
    collection::Collection,
    error::{GeneticError, OptionExt, Result},
    naming::{ArtifactNamer, DEFAULT_EXTENSION},
    operators::OperatorSpec,
    rng::RandomNumberGenerator,
    selection::{Purpose, Selector},
};

/// The shared bundle a generational loop works with: per-purpose selectors and the
/// mating and mutation runners.
///
/// The outer loop hands each generation's population to [`ToolBag::mate`] and
/// [`ToolBag::mutate`] and receives populations of novel offspring in return.
pub struct ToolBag<A: Assembly> {
    mating: Option<Mating<A>>,
    mutation: Option<Mutation<A>>,
    mating_selector: Option<Box<dyn Selector<A>>>,
    mutation_selector: Option<Box<dyn Selector<A>>>,
}

impl<A: Assembly> ToolBag<A> {
    pub fn builder() -> ToolBagBuilder<A> {
        ToolBagBuilder::new()
    }

    /// Runs one mating generation over `population`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if no mating operator is configured, or
    /// any fatal error raised by the runner.
    pub fn mate(&mut self, population: &Collection<A>) -> Result<GenerationOutcome<A>> {
        let runner = self
            .mating
            .as_mut()
            .ok_or_else_genetic(|| not_configured(Purpose::Mating))?;
        let selector = self
            .mating_selector
            .as_deref()
            .ok_or_else_genetic(|| not_configured(Purpose::Mating))?;
        runner.run(population, selector)
    }

    /// Runs one mutation generation over `population`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if no mutation operator is configured, or
    /// any fatal error raised by the runner.
    pub fn mutate(&mut self, population: &Collection<A>) -> Result<GenerationOutcome<A>> {
        let runner = self
            .mutation
            .as_mut()
            .ok_or_else_genetic(|| not_configured(Purpose::Mutation))?;
        let selector = self
            .mutation_selector
            .as_deref()
            .ok_or_else_genetic(|| not_configured(Purpose::Mutation))?;
        runner.run(population, selector)
    }

    pub fn mating(&self) -> Option<&Mating<A>> {
        self.mating.as_ref()
    }

    pub fn mutation(&self) -> Option<&Mutation<A>> {
        self.mutation.as_ref()
    }
}

fn not_configured(purpose: Purpose) -> GeneticError {
    GeneticError::Configuration(format!("No {} operator configured", purpose))
}

impl<A: Assembly> fmt::Debug for ToolBag<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolBag")
            .field("mating", &self.mating)
            .field("mutation", &self.mutation)
            .field("mating_selector", &self.mating_selector)
            .field("mutation_selector", &self.mutation_selector)
            .finish()
    }
}

enum Pending<C> {
    Spec(OperatorSpec, usize),
    Config(C),
}

/// Builder for `ToolBag`.
///
/// Operator specs are resolved in [`ToolBagBuilder::build`], so a misconfigured run
/// fails before its first generation.
pub struct ToolBagBuilder<A: Assembly> {
    mating: Option<Pending<MatingConfig<A>>>,
    mutation: Option<Pending<MutationConfig<A>>>,
    mating_selector: Option<Box<dyn Selector<A>>>,
    mutation_selector: Option<Box<dyn Selector<A>>>,
    directory: Option<PathBuf>,
    extension: String,
    seed: Option<u64>,
}

impl<A: Assembly> ToolBagBuilder<A> {
    pub fn new() -> Self {
        Self {
            mating: None,
            mutation: None,
            mating_selector: None,
            mutation_selector: None,
            directory: None,
            extension: DEFAULT_EXTENSION.to_string(),
            seed: None,
        }
    }

    /// Takes operators, quotas and artifact settings from `options`.
    pub fn with_options(mut self, options: ToolBagOptions) -> Self {
        if let Some(spec) = options.mating {
            self.mating = Some(Pending::Spec(spec, options.num_matings));
        }
        if let Some(spec) = options.mutation {
            self.mutation = Some(Pending::Spec(spec, options.num_mutations));
        }
        self.directory = options.directory;
        self.extension = options.extension;
        self.seed = options.seed;
        self
    }

    pub fn with_mating(mut self, spec: OperatorSpec, num_matings: usize) -> Self {
        self.mating = Some(Pending::Spec(spec, num_matings));
        self
    }

    pub fn with_mutation(mut self, spec: OperatorSpec, num_mutations: usize) -> Self {
        self.mutation = Some(Pending::Spec(spec, num_mutations));
        self
    }

    pub fn with_mating_config(mut self, config: MatingConfig<A>) -> Self {
        self.mating = Some(Pending::Config(config));
        self
    }

    pub fn with_mutation_config(mut self, config: MutationConfig<A>) -> Self {
        self.mutation = Some(Pending::Config(config));
        self
    }

    /// Uses `selector` for both mating and mutation.
    pub fn with_selector<S>(self, selector: S) -> Self
    where
        S: Selector<A> + Clone + 'static,
    {
        self.with_mating_selector(selector.clone())
            .with_mutation_selector(selector)
    }

    pub fn with_mating_selector<S>(mut self, selector: S) -> Self
    where
        S: Selector<A> + 'static,
    {
        self.mating_selector = Some(Box::new(selector));
        self
    }

    pub fn with_mutation_selector<S>(mut self, selector: S) -> Self
    where
        S: Selector<A> + 'static,
    {
        self.mutation_selector = Some(Box::new(selector));
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolves every operator and assembles the tool bag.
    ///
    /// # Errors
    ///
    /// Fails on an unknown operator name, a missing or malformed parameter, a
    /// configured operator without a selector for its purpose, or when neither
    /// operator is configured.
    pub fn build(self) -> Result<ToolBag<A>> {
        if self.mating.is_none() && self.mutation.is_none() {
            return Err(GeneticError::Configuration(
                "Neither a mating nor a mutation operator was specified".to_string(),
            ));
        }

        if self.mating.is_some() && self.mating_selector.is_none() {
            return Err(GeneticError::Configuration(
                "Mating selector not specified".to_string(),
            ));
        }

        if self.mutation.is_some() && self.mutation_selector.is_none() {
            return Err(GeneticError::Configuration(
                "Mutation selector not specified".to_string(),
            ));
        }

        let namer = match self.directory {
            Some(directory) => ArtifactNamer::new(directory, self.extension),
            None => ArtifactNamer::in_working_directory(self.extension)?,
        };

        let mut rng = match self.seed {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };

        let mating = self
            .mating
            .map(|pending| -> Result<Mating<A>> {
                let config = match pending {
                    Pending::Spec(spec, target) => MatingConfig::new(spec, target)?,
                    Pending::Config(config) => config,
                };
                Ok(Mating::new(config, namer.clone(), rng.fork()))
            })
            .transpose()?;

        let mutation = self
            .mutation
            .map(|pending| -> Result<Mutation<A>> {
                let config = match pending {
                    Pending::Spec(spec, target) => MutationConfig::new(spec, target)?,
                    Pending::Config(config) => config,
                };
                Ok(Mutation::new(config, namer.clone(), rng.fork()))
            })
            .transpose()?;

        Ok(ToolBag {
            mating,
            mutation,
            mating_selector: self.mating_selector,
            mutation_selector: self.mutation_selector,
        })
    }
}

impl<A: Assembly> Default for ToolBagBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}
