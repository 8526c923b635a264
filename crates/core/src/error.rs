use thiserror::Error;

/// Errors raised by the draft game model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid draft rules: {0}")]
    InvalidRules(String),

    #[error("Probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("Unknown hero id: {0}")]
    UnknownHero(u16),
}

/// Convenience Result type for draft operations
pub type Result<T> = std::result::Result<T, DraftError>;
