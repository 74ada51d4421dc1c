//! # Collection
//!
//! An ordered, set-like container of candidates. Membership is decided by
//! [`Candidate::fingerprint`], so two distinct objects describing the same assembly
//! occupy a single slot. Insertion order is preserved and drives selection order for
//! ties.
//!
//! ## Example
//!
//! ```rust
//! use std::path::{Path, PathBuf};
//! use assemblage::candidate::Candidate;
//! use assemblage::collection::Collection;
//!
//! #[derive(Clone, Debug)]
//! struct Molecule { key: String, path: PathBuf }
//!
//! impl Candidate for Molecule {
//!     type Fingerprint = String;
//!     fn fingerprint(&self) -> String { self.key.clone() }
//!     fn artifact_path(&self) -> &Path { &self.path }
//! }
//!
//! let a = Molecule { key: "A".into(), path: "a.mol".into() };
//! let a_copy = Molecule { key: "A".into(), path: "elsewhere.mol".into() };
//! let b = Molecule { key: "B".into(), path: "b.mol".into() };
//!
//! let mut parents = Collection::new();
//! parents.add_members([a, b.clone()]);
//!
//! let mut offspring = Collection::from_members([a_copy, b]);
//! offspring -= &parents;
//! assert!(offspring.is_empty());
//! ```

use std::collections::HashMap;
use std::ops::{AddAssign, Index, SubAssign};

use crate::candidate::Candidate;

/// A deduplicated, insertion-ordered population of candidates.
#[derive(Debug, Clone)]
pub struct Collection<C: Candidate> {
    members: Vec<C>,
    index: HashMap<C::Fingerprint, usize>,
}

impl<C: Candidate> Collection<C> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a collection from `members`, keeping the first of any equal candidates.
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator<Item = C>,
    {
        let mut collection = Self::new();
        collection.add_members(members);
        collection
    }

    /// Adds a candidate unless an equal one is already present.
    ///
    /// Returns `true` if the candidate was inserted.
    pub fn add(&mut self, candidate: C) -> bool {
        let key = candidate.fingerprint();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.members.len());
        self.members.push(candidate);
        true
    }

    /// Adds every candidate, silently skipping duplicates.
    ///
    /// Returns the number of candidates actually inserted.
    pub fn add_members<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = C>,
    {
        candidates
            .into_iter()
            .map(|candidate| self.add(candidate))
            .filter(|&inserted| inserted)
            .count()
    }

    pub fn contains(&self, candidate: &C) -> bool {
        self.index.contains_key(&candidate.fingerprint())
    }

    pub fn contains_fingerprint(&self, key: &C::Fingerprint) -> bool {
        self.index.contains_key(key)
    }

    /// Returns a new collection with the members of `other` removed.
    pub fn difference(&self, other: &Collection<C>) -> Collection<C> {
        let mut result = self.clone();
        result.remove_members(other);
        result
    }

    /// Returns a new collection holding the members of both, `self` first.
    pub fn union(&self, other: &Collection<C>) -> Collection<C> {
        let mut result = self.clone();
        result.add_members(other.iter().cloned());
        result
    }

    /// Removes every member equal to a member of `other`.
    ///
    /// Returns the number of members removed.
    pub fn remove_members(&mut self, other: &Collection<C>) -> usize {
        let before = self.members.len();
        self.members
            .retain(|member| !other.contains_fingerprint(&member.fingerprint()));
        let removed = before - self.members.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    fn reindex(&mut self) {
        self.index = self
            .members
            .iter()
            .enumerate()
            .map(|(position, member)| (member.fingerprint(), position))
            .collect();
    }

    pub fn get(&self, position: usize) -> Option<&C> {
        self.members.get(position)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.members.iter()
    }

    pub fn members(&self) -> &[C] {
        &self.members
    }

    pub fn into_members(self) -> Vec<C> {
        self.members
    }
}

impl<C: Candidate> Default for Collection<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Candidate> Index<usize> for Collection<C> {
    type Output = C;

    fn index(&self, position: usize) -> &C {
        &self.members[position]
    }
}

impl<C: Candidate> AddAssign<&Collection<C>> for Collection<C> {
    fn add_assign(&mut self, other: &Collection<C>) {
        self.add_members(other.iter().cloned());
    }
}

impl<C: Candidate> SubAssign<&Collection<C>> for Collection<C> {
    fn sub_assign(&mut self, other: &Collection<C>) {
        self.remove_members(other);
    }
}

impl<C: Candidate> FromIterator<C> for Collection<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self::from_members(iter)
    }
}

impl<C: Candidate> Extend<C> for Collection<C> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        self.add_members(iter);
    }
}

impl<C: Candidate> IntoIterator for Collection<C> {
    type Item = C;
    type IntoIter = std::vec::IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, C: Candidate> IntoIterator for &'a Collection<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[derive(Clone, Debug)]
    struct Molecule {
        key: u32,
        path: PathBuf,
    }

    impl Molecule {
        fn new(key: u32, path: &str) -> Self {
            Self {
                key,
                path: PathBuf::from(path),
            }
        }
    }

    impl Candidate for Molecule {
        type Fingerprint = u32;

        fn fingerprint(&self) -> u32 {
            self.key
        }

        fn artifact_path(&self) -> &Path {
            &self.path
        }
    }

    fn keys(collection: &Collection<Molecule>) -> Vec<u32> {
        collection.iter().map(|m| m.key).collect()
    }

    #[test]
    fn test_add_skips_equal_candidates() {
        let mut collection = Collection::new();
        assert!(collection.add(Molecule::new(1, "a.mol")));
        assert!(!collection.add(Molecule::new(1, "b.mol")));
        assert!(collection.add(Molecule::new(2, "c.mol")));

        assert_eq!(collection.len(), 2);
        // The first inserted copy wins.
        assert_eq!(collection[0].artifact_path(), Path::new("a.mol"));
    }

    #[test]
    fn test_add_members_counts_insertions() {
        let mut collection = Collection::new();
        let inserted = collection.add_members(vec![
            Molecule::new(1, "a.mol"),
            Molecule::new(2, "b.mol"),
            Molecule::new(1, "c.mol"),
        ]);
        assert_eq!(inserted, 2);
        assert_eq!(keys(&collection), vec![1, 2]);
    }

    #[test]
    fn test_difference_by_equality() {
        let ours = Collection::from_members((1..=5).map(|k| Molecule::new(k, "x.mol")));
        let theirs = Collection::from_members([Molecule::new(2, "y.mol"), Molecule::new(4, "z.mol")]);

        let diff = ours.difference(&theirs);
        assert_eq!(keys(&diff), vec![1, 3, 5]);
        // The source is untouched.
        assert_eq!(ours.len(), 5);
    }

    #[test]
    fn test_sub_assign_keeps_index_consistent() {
        let mut ours = Collection::from_members((1..=4).map(|k| Molecule::new(k, "x.mol")));
        let theirs = Collection::from_members([Molecule::new(1, "y.mol")]);

        ours -= &theirs;
        assert_eq!(keys(&ours), vec![2, 3, 4]);
        assert!(!ours.contains(&Molecule::new(1, "x.mol")));
        assert!(ours.contains(&Molecule::new(4, "w.mol")));

        // Reinsertion after removal works against the rebuilt index.
        assert!(ours.add(Molecule::new(1, "again.mol")));
        assert!(!ours.add(Molecule::new(3, "dupe.mol")));
        assert_eq!(keys(&ours), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_union_and_add_assign() {
        let a = Collection::from_members([Molecule::new(1, "a.mol"), Molecule::new(2, "b.mol")]);
        let b = Collection::from_members([Molecule::new(2, "c.mol"), Molecule::new(3, "d.mol")]);

        assert_eq!(keys(&a.union(&b)), vec![1, 2, 3]);

        let mut c = a.clone();
        c += &b;
        assert_eq!(keys(&c), vec![1, 2, 3]);
    }

    #[test]
    fn test_collect_from_iterator() {
        let collection: Collection<Molecule> =
            vec![Molecule::new(7, "a.mol"), Molecule::new(7, "b.mol")]
                .into_iter()
                .collect();
        assert_eq!(collection.len(), 1);
    }
}
