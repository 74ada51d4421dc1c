//! Mutation operators. Each consumes a single parent and yields one offspring
//! named after the attempt's call number.

use std::fs;
use std::path::{Path, PathBuf};

use crate::candidate::{Assembly, Component, KindOf};
use crate::error::{AttemptError, AttemptResult, Result};
use crate::selection::{Purpose, SelectionGroup};

use super::{unknown, AttemptContext, Operator, OperatorSpec};

#[derive(Debug, Clone)]
pub enum MutationOperator<A: Assembly> {
    /// Replaces the parent's first component whose kind is not `retain` with one
    /// loaded from a uniformly chosen file in `database`. Every other slot is kept
    /// in place.
    RandomSubstitute { database: PathBuf, retain: KindOf<A> },

    /// Keeps every component and rebuilds the parent on a uniformly chosen topology
    /// other than its own.
    RandomTopology { topologies: Vec<A::Topology> },
}

impl<A: Assembly> Operator<A> for MutationOperator<A> {
    const PURPOSE: Purpose = Purpose::Mutation;
    const REGISTERED: &'static [&'static str] = &["random_substitute", "random_topology"];

    fn resolve(spec: &OperatorSpec) -> Result<Self> {
        match spec.name.as_str() {
            "random_substitute" => Ok(MutationOperator::RandomSubstitute {
                database: spec.parse("database")?,
                retain: spec.parse("retain")?,
            }),
            "random_topology" => Ok(MutationOperator::RandomTopology {
                topologies: spec.parse_list("topologies")?,
            }),
            _ => Err(unknown(Purpose::Mutation, spec)),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            MutationOperator::RandomSubstitute { .. } => "random_substitute",
            MutationOperator::RandomTopology { .. } => "random_topology",
        }
    }

    fn apply(
        &self,
        group: SelectionGroup<'_, A>,
        ctx: &mut AttemptContext<'_>,
    ) -> AttemptResult<Vec<A>> {
        let SelectionGroup::Single(parent) = group else {
            return Err(AttemptError::Fault(format!(
                "mutation needs one parent, got {}",
                group.arity()
            )));
        };

        let mutant = match self {
            MutationOperator::RandomSubstitute { database, retain } => {
                random_substitute(parent, database, retain, ctx)?
            }
            MutationOperator::RandomTopology { topologies } => {
                random_topology(parent, topologies, ctx)?
            }
        };

        Ok(vec![mutant])
    }
}

/// Regular files of a component database, sorted so that seeded runs pick the same
/// entries regardless of directory iteration order.
fn database_entries(database: &Path) -> AttemptResult<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(database)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            entries.push(entry.path());
        }
    }
    entries.sort();
    Ok(entries)
}

fn random_substitute<A: Assembly>(
    parent: &A,
    database: &Path,
    retain: &KindOf<A>,
    ctx: &mut AttemptContext<'_>,
) -> AttemptResult<A> {
    let slot = parent
        .components()
        .iter()
        .position(|component| component.kind() != *retain)
        .ok_or_else(|| {
            AttemptError::NoCounterpart(format!(
                "{} holds only components of kind {}",
                parent.artifact_path().display(),
                retain
            ))
        })?;

    let entries = database_entries(database)?;
    let pick = ctx.rng.pick_index(entries.len()).ok_or_else(|| {
        AttemptError::ResourceUnavailable(format!(
            "component database {} is empty",
            database.display()
        ))
    })?;

    let mut components = parent.components().to_vec();
    components[slot] = A::load_component(&entries[pick])?;

    parent.assemble(
        components,
        parent.topology().clone(),
        ctx.namer.mutation(ctx.call),
    )
}

fn random_topology<A: Assembly>(
    parent: &A,
    topologies: &[A::Topology],
    ctx: &mut AttemptContext<'_>,
) -> AttemptResult<A> {
    let alternatives: Vec<&A::Topology> = topologies
        .iter()
        .filter(|topology| *topology != parent.topology())
        .collect();

    let pick = ctx.rng.pick_index(alternatives.len()).ok_or_else(|| {
        AttemptError::NoCounterpart(format!(
            "no topology other than {} to move {} to",
            parent.topology(),
            parent.artifact_path().display()
        ))
    })?;

    parent.assemble(
        parent.components().to_vec(),
        alternatives[pick].clone(),
        ctx.namer.mutation(ctx.call),
    )
}
