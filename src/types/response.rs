//! Response payloads for the prediction service.

use serde::{Deserialize, Serialize};

/// Successful prediction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Predicted class: 1 = employed, 0 = not employed
    pub prediction: u8,
    /// Raw model probability in [0, 1]
    pub probability: f64,
    /// Human-readable label for the predicted class
    pub interpretation: String,
}

/// Uniform error payload for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness/info payload served at the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_response_serialization() {
        let response = PredictionResponse {
            prediction: 1,
            probability: 0.87,
            interpretation: "Employed".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        let deserialized: PredictionResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.prediction, 1);
        assert_eq!(deserialized.probability, 0.87);
        assert_eq!(deserialized.interpretation, "Employed");
    }
}
