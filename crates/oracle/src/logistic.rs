//! Logistic-regression oracle.

use std::path::Path;

use drafter_mcts::{Oracle, OracleError};
use ndarray::{Array1, ArrayView1};

use crate::LinearModel;

/// Predicts `sigmoid(w · x + b)`, the probability that Radiant wins.
#[derive(Clone, Debug)]
pub struct LogisticOracle {
    weights: Array1<f32>,
    bias: f32,
}

impl LogisticOracle {
    pub fn new(model: LinearModel) -> Self {
        Self {
            weights: Array1::from(model.weights),
            bias: model.bias,
        }
    }

    /// Load weights from a JSON model file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Ok(Self::new(LinearModel::load(path)?))
    }

    /// Number of features expected per prediction.
    pub fn feature_len(&self) -> usize {
        self.weights.len()
    }

    /// Radiant win probability for one feature vector.
    ///
    /// # Errors
    /// `FeatureShape` if the vector length differs from the weights.
    pub fn predict(&self, features: &[f32]) -> Result<f64, OracleError> {
        if features.len() != self.weights.len() {
            return Err(OracleError::FeatureShape {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }
        let logit = self.weights.dot(&ArrayView1::from(features)) as f64 + self.bias as f64;
        let probability = sigmoid(logit);
        if !probability.is_finite() {
            return Err(OracleError::PredictionFailed(format!(
                "logit {} gave a non-finite probability",
                logit
            )));
        }
        Ok(probability)
    }
}

impl From<LinearModel> for LogisticOracle {
    fn from(model: LinearModel) -> Self {
        Self::new(model)
    }
}

impl Oracle<Vec<f32>> for LogisticOracle {
    fn evaluate(&self, features: &Vec<f32>) -> Result<f64, OracleError> {
        self.predict(features)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
