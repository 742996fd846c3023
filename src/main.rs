//! Employment Prediction Service - Main Entry Point
//!
//! Loads the scaler and classifier artifacts once at startup and serves
//! predictions over HTTP. Artifact failures are fatal: the process never
//! begins serving without both artifacts.

use anyhow::{Context, Result};
use employment_prediction_api::{
    config::AppConfig,
    features::SchemaValidator,
    metrics::{MetricsReporter, RequestMetrics},
    models::inference::InferenceEngine,
    server::{self, AppState},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration; a malformed file is fatal, a missing one falls
    // back to defaults
    let config = if std::path::Path::new("config/config.toml").exists() {
        AppConfig::load()?
    } else {
        AppConfig::default()
    };

    // Initialize logging (RUST_LOG overrides the configured level)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    match config.logging.format.as_str() {
        "json" => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    info!("Starting Employment Prediction Service");
    info!(
        model = %config.artifacts.model_path,
        scaler = %config.artifacts.scaler_path,
        "Loading artifacts"
    );

    // Load both artifacts; failure here aborts startup
    let engine = InferenceEngine::new(&config)?;

    let metrics = Arc::new(RequestMetrics::new());

    let state = Arc::new(AppState {
        validator: SchemaValidator::new(),
        engine,
        metrics: metrics.clone(),
    });

    // Periodic metrics summary every 60 seconds
    tokio::spawn(async move {
        let reporter = MetricsReporter::new(metrics, 60);
        reporter.start().await;
    });

    let app = server::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
