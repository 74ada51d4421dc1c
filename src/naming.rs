//! # Naming and Provenance
//!
//! Every attempt consumes one value of a run-wide [`CallCounter`]; the artifacts an
//! attempt produces are named from that value, so names never collide across the
//! whole run, even between attempts of the same generation.
//!
//! | operator | file name                                                   |
//! |----------|-------------------------------------------------------------|
//! | mating   | `mating_<call>_topology_<topology>_offspring_<pair>.<ext>` |
//! | mutation | `mutation_<call>.<ext>`                                     |

use std::path::{Path, PathBuf};

use crate::error::{Result, ResultExt};

/// File extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "mol";

/// Monotonic attempt counter. Never reset during a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounter {
    calls: u64,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes counting after `calls` attempts, e.g. when continuing a saved run.
    pub fn starting_at(calls: u64) -> Self {
        Self { calls }
    }

    /// Records a new attempt and returns its call number. The first call is 1.
    pub fn advance(&mut self) -> u64 {
        self.calls += 1;
        self.calls
    }

    /// Number of attempts recorded so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

/// Builds artifact paths for offspring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNamer {
    directory: PathBuf,
    extension: String,
}

impl ArtifactNamer {
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    /// Names artifacts under the process working directory.
    pub fn in_working_directory(extension: impl Into<String>) -> Result<Self> {
        let directory = std::env::current_dir().context("Failed to resolve working directory")?;
        Ok(Self::new(directory, extension))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn mating_file_name(&self, call: u64, topology_index: usize, pair_index: usize) -> String {
        format!(
            "mating_{}_topology_{}_offspring_{}.{}",
            call, topology_index, pair_index, self.extension
        )
    }

    pub fn mutation_file_name(&self, call: u64) -> String {
        format!("mutation_{}.{}", call, self.extension)
    }

    pub fn mating(&self, call: u64, topology_index: usize, pair_index: usize) -> PathBuf {
        self.directory
            .join(self.mating_file_name(call, topology_index, pair_index))
    }

    pub fn mutation(&self, call: u64) -> PathBuf {
        self.directory.join(self.mutation_file_name(call))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_one_and_is_monotonic() {
        let mut counter = CallCounter::new();
        assert_eq!(counter.calls(), 0);
        assert_eq!(counter.advance(), 1);
        assert_eq!(counter.advance(), 2);
        assert_eq!(counter.calls(), 2);

        let mut resumed = CallCounter::starting_at(41);
        assert_eq!(resumed.advance(), 42);
    }

    #[test]
    fn test_names_match_convention() {
        let namer = ArtifactNamer::new("/tmp/run", DEFAULT_EXTENSION);
        assert_eq!(
            namer.mating(12, 0, 2),
            PathBuf::from("/tmp/run/mating_12_topology_0_offspring_2.mol")
        );
        assert_eq!(namer.mutation(7), PathBuf::from("/tmp/run/mutation_7.mol"));
    }

    #[test]
    fn test_custom_extension() {
        let namer = ArtifactNamer::new("out", "pdb");
        assert_eq!(namer.mutation_file_name(3), "mutation_3.pdb");
        assert_eq!(namer.extension(), "pdb");
    }

    #[test]
    fn test_working_directory() {
        let namer = ArtifactNamer::in_working_directory(DEFAULT_EXTENSION).unwrap();
        assert_eq!(namer.directory(), std::env::current_dir().unwrap().as_path());
    }
}
