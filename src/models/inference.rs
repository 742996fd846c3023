//! Inference pipeline: scale, predict, threshold, interpret.

use crate::config::AppConfig;
use crate::error::{PredictError, PredictResult};
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::models::loader::{LoadedModel, ModelLoader};
use crate::models::scaler::StandardScaler;
use anyhow::{Context, Result};
use std::sync::RwLock;
use tracing::{debug, info};

/// Probability cutoff separating the two labels. Fixed at training time
/// together with the feature order; not a tunable.
pub const DECISION_THRESHOLD: f64 = 0.5;

pub const INTERPRETATION_EMPLOYED: &str = "Employed";
pub const INTERPRETATION_NOT_EMPLOYED: &str = "Not Employed";

/// Result of a single model inference.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted class: 1 = employed, 0 = not employed
    pub label: u8,
    /// Raw model probability in [0, 1]
    pub probability: f64,
    /// Fixed label string for the predicted class
    pub interpretation: &'static str,
}

impl Prediction {
    /// Threshold a raw probability into a labeled prediction.
    ///
    /// Strict inequality: exactly 0.5 maps to label 0.
    pub fn from_probability(probability: f64) -> Self {
        let label = u8::from(probability > DECISION_THRESHOLD);
        Self {
            label,
            probability,
            interpretation: if label == 1 {
                INTERPRETATION_EMPLOYED
            } else {
                INTERPRETATION_NOT_EMPLOYED
            },
        }
    }
}

/// Inference engine holding the two startup artifacts.
///
/// Both artifacts are loaded once and never mutated afterwards. The ort
/// session requires `&mut` to run, so model calls are serialized through
/// a write lock; the scaler is applied lock-free.
pub struct InferenceEngine {
    scaler: StandardScaler,
    model: RwLock<LoadedModel>,
}

impl InferenceEngine {
    /// Load both artifacts from configuration. Any failure is fatal.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_artifacts(
            &config.artifacts.scaler_path,
            &config.artifacts.model_path,
            config.artifacts.onnx_threads,
        )
    }

    /// Load artifacts from explicit paths.
    pub fn with_artifacts(
        scaler_path: &str,
        model_path: &str,
        onnx_threads: usize,
    ) -> Result<Self> {
        let scaler =
            StandardScaler::load(scaler_path).context("Failed to load scaler artifact")?;
        let loader = ModelLoader::with_threads(onnx_threads)?;
        let model = loader
            .load_model(model_path)
            .context("Failed to load classifier artifact")?;

        info!("Inference engine initialized");

        Ok(Self {
            scaler,
            model: RwLock::new(model),
        })
    }

    /// Run the full pipeline on a validated feature vector.
    pub fn predict(&self, vector: &FeatureVector) -> PredictResult<Prediction> {
        let scaled = self.scaler.transform(vector.as_slice());

        let probability = self
            .run_model(&scaled)
            .map_err(|e| PredictError::Inference(e.to_string()))?;

        let prediction = Prediction::from_probability(probability);

        debug!(
            probability = probability,
            label = prediction.label,
            "Inference complete"
        );

        Ok(prediction)
    }

    /// Run the classifier session on a scaled feature vector.
    fn run_model(&self, features: &[f32]) -> Result<f64> {
        use ort::value::Tensor;

        let shape = vec![1_i64, FEATURE_COUNT as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create input tensor")?;

        let mut model = self
            .model
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        let input_name = model.input_name.clone();
        let output_name = model.output_name.clone();

        let outputs = model.session.run(ort::inputs![&input_name => input_tensor])?;

        Self::extract_probability(&outputs, &output_name)
    }

    /// Extract the scalar class-1 probability from the session output.
    ///
    /// A Keras sigmoid export produces a [1, 1] tensor; a two-class
    /// softmax export produces [1, 2] with class 1 at index 1.
    fn extract_probability(
        outputs: &ort::session::SessionOutputs,
        output_name: &str,
    ) -> Result<f64> {
        let fallback = outputs.iter().next().map(|(_, v)| v);
        let output = outputs
            .get(output_name)
            .or_else(|| fallback.as_deref())
            .context("Model produced no outputs")?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .context("Model output is not an f32 tensor")?;

        let dims: Vec<i64> = shape.iter().copied().collect();
        let value = match dims.as_slice() {
            [_, n] if *n >= 2 => data.get(1),
            [n] if *n >= 2 => data.get(1),
            _ => data.first(),
        };

        value
            .map(|&v| v as f64)
            .context("Model output tensor is empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(Prediction::from_probability(0.5).label, 0);
        assert_eq!(Prediction::from_probability(0.500001).label, 1);
    }

    #[test]
    fn test_extreme_probabilities() {
        assert_eq!(Prediction::from_probability(0.0).label, 0);
        assert_eq!(Prediction::from_probability(1.0).label, 1);
    }

    #[test]
    fn test_interpretation_pairs_with_label() {
        let employed = Prediction::from_probability(0.87);
        assert_eq!(employed.label, 1);
        assert_eq!(employed.interpretation, INTERPRETATION_EMPLOYED);

        let not_employed = Prediction::from_probability(0.12);
        assert_eq!(not_employed.label, 0);
        assert_eq!(not_employed.interpretation, INTERPRETATION_NOT_EMPLOYED);
    }

    #[test]
    fn test_probability_passed_through() {
        let prediction = Prediction::from_probability(0.73);
        assert_eq!(prediction.probability, 0.73);
    }
}
