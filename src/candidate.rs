//! # Candidate Traits
//!
//! The engine never looks inside the objects it evolves. It only needs a way to tell
//! two of them apart, to know where each one's artifact lives and, for the built-in
//! operators, to take an assembly apart into components and build a new one.
//!
//! - [`Candidate`] is what a [`Collection`](crate::collection::Collection) and the
//!   selectors require.
//! - [`Assembly`] extends it with the component/topology view the mating and
//!   mutation operators work on.
//!
//! ## Implementing the Traits
//!
//! ```rust
//! use std::fmt;
//! use std::path::{Path, PathBuf};
//! use std::str::FromStr;
//! use assemblage::candidate::{Assembly, Candidate, Component};
//! use assemblage::error::AttemptResult;
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! enum Role { Block, Linker }
//!
//! impl FromStr for Role {
//!     type Err = String;
//!     fn from_str(s: &str) -> Result<Self, String> {
//!         match s {
//!             "block" => Ok(Role::Block),
//!             "linker" => Ok(Role::Linker),
//!             other => Err(format!("unknown role {other}")),
//!         }
//!     }
//! }
//!
//! impl fmt::Display for Role {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str(match self { Role::Block => "block", Role::Linker => "linker" })
//!     }
//! }
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! struct Part { role: Role, smiles: String }
//!
//! impl Component for Part {
//!     type Kind = Role;
//!     fn kind(&self) -> Role { self.role.clone() }
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Cage { parts: Vec<Part>, topology: String, path: PathBuf }
//!
//! impl Candidate for Cage {
//!     type Fingerprint = (Vec<Part>, String);
//!     fn fingerprint(&self) -> Self::Fingerprint {
//!         (self.parts.clone(), self.topology.clone())
//!     }
//!     fn artifact_path(&self) -> &Path { &self.path }
//! }
//!
//! impl Assembly for Cage {
//!     type Component = Part;
//!     type Topology = String;
//!     fn components(&self) -> &[Part] { &self.parts }
//!     fn topology(&self) -> &String { &self.topology }
//!     fn assemble(&self, parts: Vec<Part>, topology: String, path: PathBuf) -> AttemptResult<Self> {
//!         Ok(Cage { parts, topology, path })
//!     }
//!     fn load_component(path: &Path) -> AttemptResult<Part> {
//!         let smiles = std::fs::read_to_string(path)?;
//!         Ok(Part { role: Role::Block, smiles })
//!     }
//! }
//! ```

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::AttemptResult;

/// An object under evolutionary search.
///
/// Candidates are immutable once constructed. Two candidates are considered the same
/// member of a population when their fingerprints are equal; object identity plays
/// no part.
pub trait Candidate: Clone + Debug + Send + Sync {
    /// Canonical equality key for deduplication.
    type Fingerprint: Eq + Hash + Clone + Debug + Send + Sync;

    /// Returns the fingerprint of this candidate.
    ///
    /// Candidates that are chemically (or otherwise domain-) equal must return equal
    /// fingerprints, regardless of their artifact paths.
    fn fingerprint(&self) -> Self::Fingerprint;

    /// Returns the path of the artifact assigned to this candidate at construction.
    fn artifact_path(&self) -> &Path;
}

/// A building unit an [`Assembly`] is made of.
pub trait Component: Clone + Debug + Send + Sync {
    /// The role or type of the component. Recombination matches components by kind.
    type Kind: Eq + Hash + Clone + Debug + Display + FromStr<Err: Display> + Send + Sync;

    fn kind(&self) -> Self::Kind;
}

/// A candidate assembled from components on a topology.
pub trait Assembly: Candidate {
    type Component: Component;

    /// Descriptor of how the components are arranged.
    type Topology: Eq + Hash + Clone + Debug + Display + FromStr<Err: Display> + Send + Sync;

    /// The component slots, in construction order.
    fn components(&self) -> &[Self::Component];

    fn topology(&self) -> &Self::Topology;

    /// Builds a new assembly written to `path`.
    ///
    /// `self` serves as the template: any configuration that is not a component or the
    /// topology is carried over from it. `self` is never modified.
    fn assemble(
        &self,
        components: Vec<Self::Component>,
        topology: Self::Topology,
        path: PathBuf,
    ) -> AttemptResult<Self>;

    /// Loads a single component from a file in a component database.
    fn load_component(path: &Path) -> AttemptResult<Self::Component>;
}

/// Shorthand for the kind of an assembly's components.
pub type KindOf<A> = <<A as Assembly>::Component as Component>::Kind;
