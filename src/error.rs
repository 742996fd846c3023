//! Per-request error taxonomy for the prediction service.
//!
//! Artifact loading failures at startup are fatal and flow through
//! `anyhow::Result` from `main`; they never reach this type. Everything
//! here is recoverable and surfaced to the caller as an error payload.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

use crate::types::response::ErrorResponse;

/// Error produced while handling a single prediction request.
#[derive(Debug)]
pub enum PredictError {
    /// The request is missing a field or a field fails its type/range
    /// constraint. The message always names the offending field.
    Validation(String),
    /// Scaling or model invocation failed for a structurally valid vector.
    Inference(String),
}

impl PredictError {
    /// Validation failure for a named field.
    pub fn invalid_field(field: &str, reason: impl fmt::Display) -> Self {
        Self::Validation(format!("field `{}`: {}", field, reason))
    }
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {}", msg),
            Self::Inference(msg) => write!(f, "inference error: {}", msg),
        }
    }
}

impl std::error::Error for PredictError {}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Client fault vs server fault, rather than the upstream
            // behavior of returning every failure as a 200 payload.
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type PredictResult<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let err = PredictError::invalid_field("Lang_AWS", "must be 0 or 1 (got 3)");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_inference_maps_to_500() {
        let err = PredictError::Inference("shape mismatch".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_message_names_field() {
        let err = PredictError::invalid_field("Age (>35)", "must be 0 or 1 (got 2)");
        let msg = err.to_string();
        assert!(msg.contains("Age (>35)"));
        assert!(msg.contains("got 2"));
    }
}
