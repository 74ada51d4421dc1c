//! # Error Types
//!
//! This module defines the two error families of the library.
//!
//! - [`GeneticError`] is fatal. It signals a misconfigured run (an operator name that
//!   is not registered, a missing parameter, a broken selector) and propagates out of
//!   the generation runners with `?`.
//! - [`AttemptError`] is local to a single attempt. Operators return it when a
//!   particular selection group cannot produce offspring; the runner logs it, discards
//!   the attempt and moves on to the next group.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use assemblage::error::{GeneticError, Result};
//!
//! fn some_function() -> Result<()> {
//!     Ok(())
//! }
//!
//! fn caller() {
//!     match some_function() {
//!         Ok(_) => println!("Success!"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use assemblage::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[i32]) -> assemblage::error::Result<i32> {
//!     scores.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::Selection("no scores to compare".to_string())
//!     )
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Errors that abort a generation.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The operator name is not registered for the given purpose.
    #[error("Unknown {purpose} operator: {name}")]
    UnknownOperator { purpose: String, name: String },

    /// A registered operator was configured without a required parameter.
    #[error("Operator {operator} requires parameter {parameter}")]
    MissingParameter { operator: String, parameter: String },

    /// A parameter value could not be interpreted by the operator.
    #[error("Operator {operator} got an invalid value for {parameter}: {reason}")]
    InvalidParameter {
        operator: String,
        parameter: String,
        reason: String,
    },

    /// The selector produced something the runner cannot dispatch.
    #[error("Selection error: {0}")]
    Selection(String),

    /// Error that occurs when NaN or infinity values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// Reasons a single attempt produced no offspring.
///
/// None of these stop the generation loop.
#[derive(Error, Debug)]
pub enum AttemptError {
    /// The parents offer no compatible counterpart for the recombination.
    #[error("No compatible counterpart: {0}")]
    NoCounterpart(String),

    /// The parents or components cannot be combined into a valid assembly.
    #[error("Invalid component combination: {0}")]
    InvalidCombination(String),

    /// An external resource, such as a component database, had nothing to offer.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Reading an external resource failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything the operator did not anticipate.
    #[error("Internal fault: {0}")]
    Fault(String),
}

impl AttemptError {
    /// Returns `true` for failures that point at a bug or broken environment rather
    /// than an unlucky selection.
    pub fn is_fault(&self) -> bool {
        matches!(self, AttemptError::Fault(_) | AttemptError::Io(_))
    }
}

/// A specialized Result type for fatal library operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// The outcome of a single operator attempt.
pub type AttemptResult<T> = std::result::Result<T, AttemptError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use assemblage::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> assemblage::error::Result<()> {
///     File::open(path).context("Failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `GeneticError` carrying the provided context.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
