use std::fmt;

use tracing::{debug, info, warn};

use super::options::OperatorConfig;
use crate::{
    candidate::Assembly,
    collection::Collection,
    error::{GeneticError, Result},
    naming::ArtifactNamer,
    operators::{AttemptContext, MatingOperator, MutationOperator, Operator},
    rng::RandomNumberGenerator,
    selection::Selector,
};

/// What one generation of a runner produced.
#[derive(Debug, Clone)]
pub struct GenerationOutcome<A: Assembly> {
    /// Offspring that are not equal to any member of the parent population.
    pub offspring: Collection<A>,
    /// The quota the generation ran against.
    pub target_count: usize,
    /// Attempts that produced offspring.
    pub successes: usize,
    /// Every attempt, successful or not. Equals the number of call numbers consumed.
    pub attempts: usize,
    /// Attempts discarded for an expected reason, such as a missing counterpart.
    pub failures: usize,
    /// Attempts discarded because of an unexpected fault.
    pub faults: usize,
    /// Offspring dropped because they duplicate a parent.
    pub duplicates_removed: usize,
}

impl<A: Assembly> GenerationOutcome<A> {
    fn empty(target_count: usize) -> Self {
        Self {
            offspring: Collection::new(),
            target_count,
            successes: 0,
            attempts: 0,
            failures: 0,
            faults: 0,
            duplicates_removed: 0,
        }
    }

    /// `true` when the generation performed as many successful attempts as requested.
    ///
    /// A finite selection sequence can run out first; that is not an error.
    pub fn quota_met(&self) -> bool {
        self.successes == self.target_count
    }
}

/// Drives one operator over a selection sequence until its quota of successful
/// attempts is met or the sequence runs out.
///
/// The runner owns the call counter (through its [`OperatorConfig`]), so repeated
/// generations keep numbering where the previous one stopped.
pub struct GenerationRunner<A: Assembly, O: Operator<A>> {
    config: OperatorConfig<A, O>,
    namer: ArtifactNamer,
    rng: RandomNumberGenerator,
}

/// Runner over pairs of parents.
pub type Mating<A> = GenerationRunner<A, MatingOperator>;

/// Runner over single parents.
pub type Mutation<A> = GenerationRunner<A, MutationOperator<A>>;

impl<A: Assembly, O: Operator<A>> GenerationRunner<A, O> {
    pub fn new(
        config: OperatorConfig<A, O>,
        namer: ArtifactNamer,
        rng: RandomNumberGenerator,
    ) -> Self {
        Self { config, namer, rng }
    }

    pub fn config(&self) -> &OperatorConfig<A, O> {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut OperatorConfig<A, O> {
        &mut self.config
    }

    pub fn namer(&self) -> &ArtifactNamer {
        &self.namer
    }

    /// Call numbers consumed over the lifetime of this runner.
    pub fn calls(&self) -> u64 {
        self.config.calls()
    }

    /// Runs one generation over `population`.
    ///
    /// Every group drawn from `selector` consumes one call number before the
    /// operator is invoked, whether the attempt succeeds or not. Failed attempts are
    /// logged and skipped. Offspring equal to a member of `population` are removed
    /// from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector cannot start a sequence or yields a group
    /// whose size does not match the operator. Operator failures are never errors.
    pub fn run(
        &mut self,
        population: &Collection<A>,
        selector: &dyn Selector<A>,
    ) -> Result<GenerationOutcome<A>> {
        let target = self.config.target_count();
        let purpose = O::PURPOSE;
        let operator = self.config.operator().name();
        let mut outcome = GenerationOutcome::empty(target);

        if target == 0 {
            debug!(%purpose, operator, "quota is zero, skipping generation");
            return Ok(outcome);
        }

        let mut selection_rng = self.rng.fork();
        let groups = selector.select(population, purpose, &mut selection_rng)?;

        for group in groups {
            if group.arity() != purpose.arity() {
                return Err(GeneticError::Selection(format!(
                    "{:?} yielded a group of {} for {}, expected {}",
                    selector,
                    group.arity(),
                    purpose,
                    purpose.arity()
                )));
            }

            let call = self.config.next_call();
            outcome.attempts += 1;

            let mut ctx = AttemptContext {
                call,
                namer: &self.namer,
                rng: &mut self.rng,
            };

            match self.config.operator().apply(group, &mut ctx) {
                Ok(children) => {
                    let produced = children.len();
                    outcome.offspring.add_members(children);
                    outcome.successes += 1;
                    info!(
                        %purpose,
                        operator,
                        call,
                        produced,
                        "{} number {}. Finish when {}.",
                        purpose,
                        outcome.successes,
                        target
                    );
                    if outcome.successes == target {
                        break;
                    }
                }
                Err(err) if err.is_fault() => {
                    outcome.faults += 1;
                    warn!(%purpose, operator, call, error = %err, "attempt discarded");
                }
                Err(err) => {
                    outcome.failures += 1;
                    debug!(%purpose, operator, call, error = %err, "attempt discarded");
                }
            }
        }

        outcome.duplicates_removed = outcome.offspring.remove_members(population);

        debug!(
            %purpose,
            operator,
            successes = outcome.successes,
            attempts = outcome.attempts,
            kept = outcome.offspring.len(),
            duplicates_removed = outcome.duplicates_removed,
            "generation finished"
        );

        Ok(outcome)
    }
}

impl<A: Assembly, O: Operator<A>> fmt::Debug for GenerationRunner<A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRunner")
            .field("config", &self.config)
            .field("namer", &self.namer)
            .finish()
    }
}
