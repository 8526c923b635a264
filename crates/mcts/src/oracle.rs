//! Win-probability oracle abstraction.
//!
//! The search treats the match-outcome classifier as a black box that maps
//! a terminal draft's feature vector to the probability that Radiant wins.

use thiserror::Error;

/// Errors reported by an oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    #[error("Predicted probability {0} is outside [0, 1]")]
    OutOfRange(f64),

    #[error("Feature vector has length {actual}, expected {expected}")]
    FeatureShape { expected: usize, actual: usize },
}

/// Trait for win-probability predictors.
///
/// Implementations must be free of side effects that matter to the search:
/// the same features may be evaluated many times.
pub trait Oracle<O: ?Sized> {
    /// Probability in [0, 1] that Radiant wins with the drafted teams.
    fn evaluate(&self, features: &O) -> Result<f64, OracleError>;
}

impl<O: ?Sized, T: Oracle<O> + ?Sized> Oracle<O> for &T {
    fn evaluate(&self, features: &O) -> Result<f64, OracleError> {
        (**self).evaluate(features)
    }
}

/// Oracle that ignores its input and always predicts the same probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantOracle(pub f64);

impl<O: ?Sized> Oracle<O> for ConstantOracle {
    fn evaluate(&self, _features: &O) -> Result<f64, OracleError> {
        Ok(self.0)
    }
}

/// Adapter turning a closure into an oracle.
#[derive(Clone, Copy, Debug)]
pub struct FnOracle<F>(pub F);

impl<O: ?Sized, F> Oracle<O> for FnOracle<F>
where
    F: Fn(&O) -> Result<f64, OracleError>,
{
    fn evaluate(&self, features: &O) -> Result<f64, OracleError> {
        (self.0)(features)
    }
}
