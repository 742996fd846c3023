//! Model artifacts: scaler loading and ONNX inference

pub mod inference;
pub mod loader;
pub mod scaler;
