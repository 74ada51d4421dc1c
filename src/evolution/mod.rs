pub mod options;
pub mod runner;
pub mod toolbag;

pub use options::{MatingConfig, MutationConfig, OperatorConfig, ToolBagOptions};
pub use runner::{GenerationOutcome, GenerationRunner, Mating, Mutation};
pub use toolbag::{ToolBag, ToolBagBuilder};
