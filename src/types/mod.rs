//! Request and response payload types

pub mod request;
pub mod response;

pub use request::PredictionRequest;
pub use response::{ApiInfo, ErrorResponse, HealthStatus, PredictionResponse};
