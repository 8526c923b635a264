//! Fitted linear classifier weights.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Weights and intercept of a logistic-regression model over draft features.
///
/// The feature layout is the one produced by the draft game's `observe`:
/// one block of one-hot Radiant heroes followed by one block for Dire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: Vec<f32>,
    pub bias: f32,
}

impl LinearModel {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self { weights, bias }
    }

    /// Parse a model from its JSON form.
    ///
    /// # Errors
    /// Fails on malformed JSON, an empty weight vector, or non-finite values.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json).context("Failed to parse model JSON")?;
        model.validate()?;
        Ok(model)
    }

    /// Load a model from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model from {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Invalid model in {:?}", path))
    }

    /// Write the model as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write model to {:?}", path))
    }

    /// Number of features the model expects.
    pub fn feature_len(&self) -> usize {
        self.weights.len()
    }

    /// A stand-in model for demos and tests.
    ///
    /// Each hero gets a strength drawn from the seed. Picking it adds that
    /// strength for Radiant and subtracts it for Dire, so the model is
    /// antisymmetric between the two sides.
    pub fn synthetic(hero_count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let strengths: Vec<f32> = (0..hero_count).map(|_| rng.gen_range(-0.5..0.5)).collect();
        let weights = strengths
            .iter()
            .copied()
            .chain(strengths.iter().map(|s| -s))
            .collect();
        Self { weights, bias: 0.0 }
    }

    fn validate(&self) -> Result<()> {
        if self.weights.is_empty() {
            bail!("model has no weights");
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            bail!("model contains non-finite values");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let model = LinearModel::from_json(r#"{"weights": [0.5, -0.5], "bias": 0.1}"#).unwrap();
        assert_eq!(model.feature_len(), 2);
        assert!((model.bias - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_models() {
        assert!(LinearModel::from_json("not json").is_err());
        assert!(LinearModel::from_json(r#"{"weights": [], "bias": 0.0}"#).is_err());
        assert!(LinearModel::from_json(r#"{"weights": [1.0]}"#).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let model = LinearModel::synthetic(4, 1);
        model.save(&path).unwrap();
        assert_eq!(LinearModel::load(&path).unwrap(), model);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = LinearModel::load("/nonexistent/model.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/model.json"));
    }

    #[test]
    fn test_synthetic_is_antisymmetric_and_seeded() {
        let model = LinearModel::synthetic(5, 42);
        assert_eq!(model.feature_len(), 10);
        for i in 0..5 {
            assert_eq!(model.weights[i], -model.weights[i + 5]);
        }
        assert_eq!(model, LinearModel::synthetic(5, 42));
        assert_ne!(model, LinearModel::synthetic(5, 43));
    }
}
