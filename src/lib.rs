pub mod candidate;
pub mod collection;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod naming;
pub mod operators;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use candidate::{Assembly, Candidate, Component};
pub use collection::Collection;
pub use error::{AttemptError, GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{GenerationOutcome, ToolBag};
pub use selection::{Purpose, SelectionGroup, Selector};
