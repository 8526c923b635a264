//! Draft domain types with enforced invariants.
//!
//! - Side: one of the two teams taking turns in the draft
//! - Probability: a win probability in range [0, 1]

use std::fmt;

use crate::{DraftError, Result};

/// One of the two drafting teams.
///
/// The win-probability oracle always reports the chance that `Radiant` wins;
/// rewards for `Dire` are its complement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Radiant,
    Dire,
}

impl Side {
    /// Get the opposing side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Radiant => Side::Dire,
            Side::Dire => Side::Radiant,
        }
    }

    /// True for the side whose win probability the oracle reports.
    pub fn is_radiant(self) -> bool {
        self == Side::Radiant
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Radiant => write!(f, "Radiant"),
            Side::Dire => write!(f, "Dire"),
        }
    }
}

/// A probability (or reward) in range [0, 1].
///
/// # Example
/// ```
/// use drafter_core::Probability;
///
/// let p = Probability::new(0.75).unwrap();
/// assert!((p.complement().get() - 0.25).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    /// Create a new probability.
    ///
    /// # Errors
    /// Returns `DraftError::InvalidProbability` if the value is NaN or outside [0, 1].
    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(DraftError::InvalidProbability(value));
        }
        Ok(Self(value))
    }

    /// Create a probability by clamping to [0, 1].
    ///
    /// NaN maps to 0.5.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::EVEN;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Certain win.
    pub const CERTAIN: Self = Self(1.0);

    /// Certain loss.
    pub const IMPOSSIBLE: Self = Self(0.0);

    /// Coin flip.
    pub const EVEN: Self = Self(0.5);

    /// Get the underlying value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// The same event seen from the other side.
    pub fn complement(self) -> Self {
        Self(1.0 - self.0)
    }

    /// Express a Radiant win probability from `side`'s point of view.
    pub fn for_side(self, side: Side) -> Self {
        match side {
            Side::Radiant => self,
            Side::Dire => self.complement(),
        }
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> f64 {
        p.0
    }
}
