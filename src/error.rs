//! Error types shared by the solver library.
//!
//! A search that runs out of frontier or depth is not an error: strategies
//! report that as `None`. Errors are reserved for configuration mistakes and
//! for input that is not a valid board.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// An unknown heuristic or strategy name was supplied.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The tiles do not form a permutation of 0..=8.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type for solver operations
pub type SolveResult<T> = Result<T, SolveError>;
