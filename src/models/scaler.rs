//! Standard-scaler artifact loading and application.
//!
//! The scaler is exported at training time as a JSON file holding the
//! per-feature mean and scale captured at fit time, together with the
//! feature order it was fitted on:
//!
//! ```json
//! {
//!   "feature_order": ["Employment", "PreviousSalary", ...],
//!   "mean": [0.52, 61243.8, ...],
//!   "scale": [0.49, 31882.2, ...]
//! }
//! ```
//!
//! Loading verifies the artifact against the schema, so a scaler fitted on
//! a different column order is rejected at startup instead of silently
//! degrading predictions.

use crate::features::{FEATURE_COUNT, FEATURE_ORDER};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct ScalerFile {
    /// Feature order the scaler was fitted on, if recorded by the export.
    #[serde(default)]
    feature_order: Option<Vec<String>>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Fitted standard scaler: `(x - mean) / scale` per feature slot.
///
/// Immutable after loading; shared read-only across all requests.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Load and verify a scaler artifact. Any mismatch with the feature
    /// schema is fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler artifact {}", path.display()))?;
        let file: ScalerFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scaler artifact {}", path.display()))?;

        Self::from_params(file.mean, file.scale, file.feature_order.as_deref()).with_context(
            || format!("Scaler artifact {} failed verification", path.display()),
        )
    }

    /// Build a scaler from raw parameters, verifying them against the schema.
    pub fn from_params(
        mean: Vec<f64>,
        scale: Vec<f64>,
        feature_order: Option<&[String]>,
    ) -> Result<Self> {
        if mean.len() != FEATURE_COUNT {
            bail!(
                "scaler mean has {} entries, expected {}",
                mean.len(),
                FEATURE_COUNT
            );
        }
        if scale.len() != FEATURE_COUNT {
            bail!(
                "scaler scale has {} entries, expected {}",
                scale.len(),
                FEATURE_COUNT
            );
        }
        if let Some((i, _)) = scale.iter().enumerate().find(|(_, s)| **s == 0.0) {
            bail!("scaler scale for `{}` is zero", FEATURE_ORDER[i]);
        }
        if let Some(order) = feature_order {
            if order.len() != FEATURE_COUNT {
                bail!(
                    "scaler feature_order has {} entries, expected {}",
                    order.len(),
                    FEATURE_COUNT
                );
            }
            for (i, name) in order.iter().enumerate() {
                if name != FEATURE_ORDER[i] {
                    bail!(
                        "scaler feature_order[{}] is `{}`, schema expects `{}`",
                        i,
                        name,
                        FEATURE_ORDER[i]
                    );
                }
            }
        }

        info!(features = FEATURE_COUNT, "Scaler artifact verified");

        Ok(Self { mean, scale })
    }

    /// Apply the fitted transform, preserving length and order.
    pub fn transform(&self, features: &[f32]) -> Vec<f32> {
        features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| ((x as f64 - mean) / scale) as f32)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_scaler() -> StandardScaler {
        StandardScaler::from_params(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT], None)
            .unwrap()
    }

    #[test]
    fn test_identity_transform() {
        let scaler = identity_scaler();
        let input: Vec<f32> = (0..FEATURE_COUNT).map(|i| i as f32).collect();

        let scaled = scaler.transform(&input);

        assert_eq!(scaled, input);
    }

    #[test]
    fn test_transform_applies_mean_and_scale() {
        let mut mean = vec![0.0; FEATURE_COUNT];
        let mut scale = vec![1.0; FEATURE_COUNT];
        mean[1] = 50000.0;
        scale[1] = 25000.0;
        let scaler = StandardScaler::from_params(mean, scale, None).unwrap();

        let mut input = vec![0.0_f32; FEATURE_COUNT];
        input[1] = 75000.0;
        let scaled = scaler.transform(&input);

        assert_eq!(scaled[1], 1.0);
        assert_eq!(scaled[0], 0.0);
        assert_eq!(scaled.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let scaler = identity_scaler();
        let input = vec![1.5_f32; FEATURE_COUNT];

        assert_eq!(scaler.transform(&input), scaler.transform(&input));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let result = StandardScaler::from_params(vec![0.0; 10], vec![1.0; FEATURE_COUNT], None);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut scale = vec![1.0; FEATURE_COUNT];
        scale[5] = 0.0;
        let result = StandardScaler::from_params(vec![0.0; FEATURE_COUNT], scale, None);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Lang_Bash/Shell"));
    }

    #[test]
    fn test_mismatched_feature_order_rejected() {
        let mut order: Vec<String> = FEATURE_ORDER.iter().map(|s| s.to_string()).collect();
        order.swap(0, 1);

        let result = StandardScaler::from_params(
            vec![0.0; FEATURE_COUNT],
            vec![1.0; FEATURE_COUNT],
            Some(&order),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_matching_feature_order_accepted() {
        let order: Vec<String> = FEATURE_ORDER.iter().map(|s| s.to_string()).collect();

        let result = StandardScaler::from_params(
            vec![0.0; FEATURE_COUNT],
            vec![1.0; FEATURE_COUNT],
            Some(&order),
        );
        assert!(result.is_ok());
    }
}
