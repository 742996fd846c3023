//! Employment Prediction Service
//!
//! Serves a single pre-trained binary classifier (employment status from a
//! fixed 23-feature vector) over HTTP. Requests are validated against the
//! fixed feature schema, scaled with the fitted transform, and run through
//! the ONNX classifier.

pub mod config;
pub mod error;
pub mod features;
pub mod metrics;
pub mod models;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::PredictError;
pub use features::{FeatureVector, SchemaValidator};
pub use metrics::RequestMetrics;
pub use models::inference::{InferenceEngine, Prediction};
pub use types::{PredictionRequest, PredictionResponse};
