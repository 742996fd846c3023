//! HTTP surface for the prediction service.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::PredictError;
use crate::features::SchemaValidator;
use crate::metrics::RequestMetrics;
use crate::models::inference::InferenceEngine;
use crate::types::{ApiInfo, HealthStatus, PredictionRequest, PredictionResponse};

/// Shared per-process state: the validator and the two startup artifacts
/// behind the engine, plus request metrics. Read-only after startup.
pub struct AppState {
    pub validator: SchemaValidator,
    pub engine: InferenceEngine,
    pub metrics: Arc<RequestMetrics>,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
}

/// Liveness/info endpoint.
async fn root() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Employment Prediction API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check endpoint. Artifact loading is fatal before the listener
/// binds, so a process that answers here has its artifacts.
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
    })
}

/// Prediction endpoint: validate, scale, predict, threshold, interpret.
async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResponse>, PredictError> {
    let start_time = Instant::now();

    // Malformed request bodies get the same uniform error payload as
    // schema failures
    let Json(payload) = payload.map_err(|e| {
        state.metrics.record_validation_failure();
        warn!(error = %e, "Request body rejected");
        PredictError::Validation(e.body_text())
    })?;

    let request = PredictionRequest::from_json(payload).map_err(|e| {
        state.metrics.record_validation_failure();
        warn!(error = %e, "Request rejected");
        e
    })?;

    let vector = state.validator.validate(&request).map_err(|e| {
        state.metrics.record_validation_failure();
        warn!(error = %e, "Request rejected");
        e
    })?;

    let prediction = state.engine.predict(&vector).map_err(|e| {
        state.metrics.record_inference_failure();
        warn!(error = %e, "Inference failed");
        e
    })?;

    let handling_time = start_time.elapsed();
    state
        .metrics
        .record_prediction(handling_time, prediction.label, prediction.probability);

    debug!(
        label = prediction.label,
        probability = prediction.probability,
        handling_time_us = handling_time.as_micros(),
        "Prediction served"
    );

    Ok(Json(PredictionResponse {
        prediction: prediction.label,
        probability: prediction.probability,
        interpretation: prediction.interpretation.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_payload() {
        let Json(info) = root().await;
        assert_eq!(info.message, "Employment Prediction API is running");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_always_healthy() {
        let Json(status) = health().await;
        assert_eq!(status.status, "healthy");
    }
}
