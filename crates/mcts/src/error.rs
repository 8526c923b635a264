use drafter_core::DraftError;
use thiserror::Error;

use crate::oracle::OracleError;

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// An action outside the current legal set reached the game model.
    #[error(transparent)]
    InvalidAction(#[from] DraftError),

    /// Malformed budget or root arguments; raised before any iteration runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A bug in the engine itself.
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    /// The win-probability oracle failed during a simulation.
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
