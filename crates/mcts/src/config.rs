//! Search configuration parameters.

use std::time::{Duration, Instant};

use crate::{Result, SearchError};

/// Exploration constant tuned for all-pick drafts (2^-3).
pub const ALL_PICK_EXPLORATION: f64 = 0.125;

/// Exploration constant tuned for captains-mode drafts (2^-5).
pub const CAPTAINS_MODE_EXPLORATION: f64 = 0.031_25;

/// Exploration constant used together with a transposition table (2^-5).
pub const TRANSPOSITION_EXPLORATION: f64 = 0.031_25;

/// How long a search may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Budget {
    /// Wall-clock limit, checked between iterations.
    Time(Duration),

    /// Fixed number of select/expand/simulate/backup iterations.
    Iterations(u32),
}

impl Budget {
    /// True once no further iteration may start.
    pub fn exhausted(&self, started: Instant, iterations: u32) -> bool {
        match *self {
            Budget::Time(limit) => started.elapsed() >= limit,
            Budget::Iterations(limit) => iterations >= limit,
        }
    }
}

/// Search configuration.
///
/// Exactly one of `time_limit` and `iteration_limit` must be set; this is
/// checked by [`MctsConfig::budget`] before a search starts.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// UCB1 exploration constant `Cp`.
    /// Final move selection always uses 0 (pure exploitation).
    pub exploration_constant: f64,

    /// Wall-clock budget.
    pub time_limit: Option<Duration>,

    /// Iteration budget.
    pub iteration_limit: Option<u32>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: ALL_PICK_EXPLORATION,
            time_limit: Some(Duration::from_secs(1)),
            iteration_limit: None,
        }
    }
}

impl MctsConfig {
    /// Create a config with an iteration budget.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            time_limit: None,
            iteration_limit: Some(iterations),
            ..Default::default()
        }
    }

    /// Create a config with a wall-clock budget.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
            iteration_limit: None,
            ..Default::default()
        }
    }

    /// Builder pattern: set the exploration constant.
    pub fn exploration(mut self, cp: f64) -> Self {
        self.exploration_constant = cp;
        self
    }

    /// Validate the budget arguments.
    ///
    /// # Errors
    /// Returns `SearchError::Configuration` if both or neither limit is set,
    /// or if the exploration constant is negative or not finite.
    pub fn budget(&self) -> Result<Budget> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::Configuration(format!(
                "exploration constant {} must be finite and non-negative",
                self.exploration_constant
            )));
        }
        match (self.time_limit, self.iteration_limit) {
            (Some(limit), None) => Ok(Budget::Time(limit)),
            (None, Some(iterations)) => Ok(Budget::Iterations(iterations)),
            (Some(_), Some(_)) => Err(SearchError::Configuration(
                "both a time limit and an iteration limit were given".to_string(),
            )),
            (None, None) => Err(SearchError::Configuration(
                "either a time limit or an iteration limit is required".to_string(),
            )),
        }
    }
}
