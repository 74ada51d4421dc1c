//! Mating operators. Each consumes a pair of parents.

use crate::candidate::{Assembly, Component};
use crate::error::{AttemptError, AttemptResult, Result};
use crate::selection::{Purpose, SelectionGroup};

use super::{unknown, AttemptContext, Operator, OperatorSpec};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatingOperator {
    /// Pairs each of the first parent's two leading components with a component of
    /// a different kind taken from the second parent, and builds both pairings on
    /// every distinct topology found among the parents.
    ///
    /// A successful attempt yields `2 * t` offspring, where `t` is the number of
    /// distinct parent topologies.
    ComponentExchange,
}

impl<A: Assembly> Operator<A> for MatingOperator {
    const PURPOSE: Purpose = Purpose::Mating;
    const REGISTERED: &'static [&'static str] = &["component_exchange"];

    fn resolve(spec: &OperatorSpec) -> Result<Self> {
        match spec.name.as_str() {
            "component_exchange" => Ok(MatingOperator::ComponentExchange),
            _ => Err(unknown(Purpose::Mating, spec)),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            MatingOperator::ComponentExchange => "component_exchange",
        }
    }

    fn apply(
        &self,
        group: SelectionGroup<'_, A>,
        ctx: &mut AttemptContext<'_>,
    ) -> AttemptResult<Vec<A>> {
        let SelectionGroup::Pair(first, second) = group else {
            return Err(AttemptError::Fault(format!(
                "mating needs two parents, got {}",
                group.arity()
            )));
        };

        match self {
            MatingOperator::ComponentExchange => component_exchange(first, second, ctx),
        }
    }
}

/// First component of `donor` whose kind differs from `component`'s.
fn counterpart<'p, A: Assembly>(
    component: &A::Component,
    donor: &'p A,
) -> AttemptResult<&'p A::Component> {
    let kind = component.kind();
    donor
        .components()
        .iter()
        .find(|candidate| candidate.kind() != kind)
        .ok_or_else(|| {
            AttemptError::NoCounterpart(format!(
                "{} holds no component differing from kind {}",
                donor.artifact_path().display(),
                kind
            ))
        })
}

fn component_exchange<A: Assembly>(
    first: &A,
    second: &A,
    ctx: &mut AttemptContext<'_>,
) -> AttemptResult<Vec<A>> {
    let [block1, block2] = match first.components() {
        [a, b, ..] => [a, b],
        other => {
            return Err(AttemptError::InvalidCombination(format!(
                "{} has {} components, component exchange needs two",
                first.artifact_path().display(),
                other.len()
            )))
        }
    };

    let counterpart1 = counterpart(block1, second)?;
    let counterpart2 = counterpart(block2, second)?;

    // Distinct topologies, first parent's first.
    let mut topologies: Vec<&A::Topology> = Vec::with_capacity(2);
    for topology in [first.topology(), second.topology()] {
        if !topologies.contains(&topology) {
            topologies.push(topology);
        }
    }

    let mut offspring = Vec::with_capacity(2 * topologies.len());
    for (index, topology) in topologies.into_iter().enumerate() {
        offspring.push(first.assemble(
            vec![block1.clone(), counterpart1.clone()],
            topology.clone(),
            ctx.namer.mating(ctx.call, index, 1),
        )?);
        offspring.push(first.assemble(
            vec![block2.clone(), counterpart2.clone()],
            topology.clone(),
            ctx.namer.mating(ctx.call, index, 2),
        )?);
    }

    Ok(offspring)
}
