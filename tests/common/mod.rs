//! A small cage-like domain used by the integration tests.
#![allow(dead_code)]

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempfile::TempDir;

use assemblage::{
    candidate::{Assembly, Candidate, Component},
    collection::Collection,
    error::{AttemptError, AttemptResult, Result},
    rng::RandomNumberGenerator,
    selection::{Purpose, Selection, SelectionGroup, Selector},
};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    BuildingBlock,
    Linker,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::BuildingBlock => f.write_str("building_block"),
            Role::Linker => f.write_str("linker"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "building_block" => Ok(Role::BuildingBlock),
            "linker" => Ok(Role::Linker),
            other => Err(format!("unknown role {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Unit {
    pub role: Role,
    pub smiles: String,
}

impl Component for Unit {
    type Kind = Role;

    fn kind(&self) -> Role {
        self.role.clone()
    }
}

pub fn block(smiles: &str) -> Unit {
    Unit {
        role: Role::BuildingBlock,
        smiles: smiles.to_string(),
    }
}

pub fn linker(smiles: &str) -> Unit {
    Unit {
        role: Role::Linker,
        smiles: smiles.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    FourPlusSix,
    EightPlusTwelve,
    TwoPlusThree,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::FourPlusSix => f.write_str("four_plus_six"),
            Topology::EightPlusTwelve => f.write_str("eight_plus_twelve"),
            Topology::TwoPlusThree => f.write_str("two_plus_three"),
        }
    }
}

impl FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "four_plus_six" => Ok(Topology::FourPlusSix),
            "eight_plus_twelve" => Ok(Topology::EightPlusTwelve),
            "two_plus_three" => Ok(Topology::TwoPlusThree),
            other => Err(format!("unknown topology {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Cage {
    pub units: Vec<Unit>,
    pub topology: Topology,
    pub optimizer: String,
    pub path: PathBuf,
}

impl Cage {
    pub fn new(units: Vec<Unit>, topology: Topology, name: &str) -> Self {
        Self {
            units,
            topology,
            optimizer: "rdkit".to_string(),
            path: PathBuf::from(name),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Candidate for Cage {
    type Fingerprint = (Vec<Unit>, Topology);

    fn fingerprint(&self) -> Self::Fingerprint {
        let mut units = self.units.clone();
        units.sort();
        (units, self.topology.clone())
    }

    fn artifact_path(&self) -> &Path {
        &self.path
    }
}

impl Assembly for Cage {
    type Component = Unit;
    type Topology = Topology;

    fn components(&self) -> &[Unit] {
        &self.units
    }

    fn topology(&self) -> &Topology {
        &self.topology
    }

    fn assemble(&self, units: Vec<Unit>, topology: Topology, path: PathBuf) -> AttemptResult<Self> {
        if units.len() < 2 {
            return Err(AttemptError::InvalidCombination(format!(
                "a cage needs at least two units, got {}",
                units.len()
            )));
        }
        Ok(Self {
            units,
            topology,
            optimizer: self.optimizer.clone(),
            path,
        })
    }

    fn load_component(path: &Path) -> AttemptResult<Unit> {
        let smiles = fs::read_to_string(path)?.trim().to_string();
        if smiles.is_empty() {
            return Err(AttemptError::InvalidCombination(format!(
                "{} holds no structure",
                path.display()
            )));
        }
        Ok(block(&smiles))
    }
}

/// Higher for cages with longer building blocks.
pub fn size_score(cage: &Cage) -> f64 {
    cage.units.iter().map(|u| u.smiles.len() as f64).sum()
}

/// Replays a fixed list of member positions, in order, then ends.
#[derive(Debug, Clone)]
pub struct Scripted {
    groups: Vec<Vec<usize>>,
}

impl Scripted {
    pub fn pairs(pairs: &[(usize, usize)]) -> Self {
        Self {
            groups: pairs.iter().map(|&(a, b)| vec![a, b]).collect(),
        }
    }

    pub fn singles(singles: &[usize]) -> Self {
        Self {
            groups: singles.iter().map(|&a| vec![a]).collect(),
        }
    }
}

impl Selector<Cage> for Scripted {
    fn select<'a>(
        &self,
        population: &'a Collection<Cage>,
        _purpose: Purpose,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Selection<'a, Cage>> {
        let groups = self.groups.clone();
        Ok(Box::new(groups.into_iter().map(move |group| match group[..] {
            [a] => SelectionGroup::Single(&population[a]),
            [a, b] => SelectionGroup::Pair(&population[a], &population[b]),
            _ => panic!("scripted groups hold one or two members"),
        })))
    }
}

/// A component database directory with one file per entry. Removed on drop.
pub fn database(entries: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, smiles) in entries {
        fs::write(dir.path().join(name), smiles).unwrap();
    }
    dir
}
