//! Request metrics and statistics tracking for the prediction service.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for request handling
pub struct RequestMetrics {
    /// Total prediction requests served successfully
    pub predictions_served: AtomicU64,
    /// Predictions with label 1 (employed)
    pub employed_predictions: AtomicU64,
    /// Requests rejected by schema validation
    pub validation_failures: AtomicU64,
    /// Requests failed during inference
    pub inference_failures: AtomicU64,
    /// Request handling times (in microseconds)
    handling_times: RwLock<Vec<u64>>,
    /// Probability distribution buckets
    probability_buckets: RwLock<[u64; 10]>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl RequestMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            employed_predictions: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            inference_failures: AtomicU64::new(0),
            handling_times: RwLock::new(Vec::with_capacity(1000)),
            probability_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a served prediction
    pub fn record_prediction(&self, handling_time: Duration, label: u8, probability: f64) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);
        if label == 1 {
            self.employed_predictions.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut times) = self.handling_times.write() {
            times.push(handling_time.as_micros() as u64);
            // Keep only the most recent window for memory efficiency
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        let bucket = (probability * 10.0).min(9.0) as usize;
        if let Ok(mut buckets) = self.probability_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a request rejected by validation
    pub fn record_validation_failure(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that failed during inference
    pub fn record_inference_failure(&self) {
        self.inference_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get request handling time statistics
    pub fn get_handling_stats(&self) -> HandlingStats {
        let times = self.handling_times.read().unwrap();
        if times.is_empty() {
            return HandlingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        HandlingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Get current throughput (requests per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.predictions_served.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Get probability distribution
    pub fn get_probability_distribution(&self) -> [u64; 10] {
        *self.probability_buckets.read().unwrap()
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let served = self.predictions_served.load(Ordering::Relaxed);
        let employed = self.employed_predictions.load(Ordering::Relaxed);
        let validation = self.validation_failures.load(Ordering::Relaxed);
        let inference = self.inference_failures.load(Ordering::Relaxed);
        let employed_rate = if served > 0 {
            (employed as f64 / served as f64) * 100.0
        } else {
            0.0
        };

        let handling = self.get_handling_stats();
        let throughput = self.get_throughput();

        info!(
            predictions_served = served,
            employed_rate = format!("{:.1}%", employed_rate),
            validation_failures = validation,
            inference_failures = inference,
            throughput = format!("{:.1} req/s", throughput),
            "Metrics summary"
        );
        info!(
            mean_us = handling.mean_us,
            p50_us = handling.p50_us,
            p95_us = handling.p95_us,
            p99_us = handling.p99_us,
            "Request handling time (μs)"
        );

        let distribution = self.get_probability_distribution();
        let total: u64 = distribution.iter().sum();
        if total > 0 {
            for (i, &count) in distribution.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let pct = (count as f64 / total as f64) * 100.0;
                info!(
                    bucket = format!("{:.1}-{:.1}", i as f64 / 10.0, (i + 1) as f64 / 10.0),
                    count = count,
                    pct = format!("{:.1}%", pct),
                    "Probability distribution"
                );
            }
        }
    }
}

impl Default for RequestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Request handling time statistics
#[derive(Debug, Default)]
pub struct HandlingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Periodic reporter that logs metric summaries
pub struct MetricsReporter {
    metrics: std::sync::Arc<RequestMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: std::sync::Arc<RequestMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = RequestMetrics::new();

        metrics.record_prediction(Duration::from_micros(100), 1, 0.8);
        metrics.record_prediction(Duration::from_micros(200), 0, 0.2);
        metrics.record_validation_failure();
        metrics.record_inference_failure();

        assert_eq!(metrics.predictions_served.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.employed_predictions.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.validation_failures.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.inference_failures.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_probability_buckets() {
        let metrics = RequestMetrics::new();

        metrics.record_prediction(Duration::from_micros(50), 0, 0.05);
        metrics.record_prediction(Duration::from_micros(50), 1, 0.95);
        metrics.record_prediction(Duration::from_micros(50), 1, 1.0);

        let distribution = metrics.get_probability_distribution();
        assert_eq!(distribution[0], 1);
        assert_eq!(distribution[9], 2);
    }

    #[test]
    fn test_handling_stats() {
        let metrics = RequestMetrics::new();

        metrics.record_prediction(Duration::from_micros(100), 0, 0.3);
        metrics.record_prediction(Duration::from_micros(300), 1, 0.7);

        let stats = metrics.get_handling_stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean_us, 200);
        assert_eq!(stats.max_us, 300);
    }
}
