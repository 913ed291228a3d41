//! Observability infrastructure for ratio evaluation
//!
//! Provides:
//! - Prometheus metrics (evaluation counts, error reasons, last ratio, latency)
//! - Structured logging of evaluation outcomes with tracing

use crate::error::RatioError;
use crate::models::{RequestRatio, ScaleDirection, TargetRange, UsageRatio};
use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter_vec, GaugeVec, Histogram,
    IntCounterVec,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for evaluation latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.000001, 0.000005, 0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01,
];

/// Calculator kind label for request-relative evaluations
pub const KIND_REQUEST: &str = "request";

/// Calculator kind label for range-relative evaluations
pub const KIND_RANGE: &str = "range";

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<RatioMetricsInner> = OnceLock::new();

struct RatioMetricsInner {
    evaluations: IntCounterVec,
    errors: IntCounterVec,
    last_ratio: GaugeVec,
    evaluation_seconds: Histogram,
}

impl RatioMetricsInner {
    fn new() -> Self {
        Self {
            evaluations: register_int_counter_vec!(
                "scaling_ratio_evaluations_total",
                "Total number of scaling ratio evaluations",
                &["kind"]
            )
            .expect("Failed to register evaluations_total"),

            errors: register_int_counter_vec!(
                "scaling_ratio_errors_total",
                "Total number of failed scaling ratio evaluations",
                &["reason"]
            )
            .expect("Failed to register errors_total"),

            last_ratio: register_gauge_vec!(
                "scaling_ratio_last",
                "Most recently computed scaling ratio",
                &["kind"]
            )
            .expect("Failed to register last_ratio"),

            evaluation_seconds: register_histogram!(
                "scaling_ratio_evaluation_seconds",
                "Time spent computing a scaling ratio",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register evaluation_seconds"),
        }
    }
}

/// Ratio metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct RatioMetrics {
    _private: (),
}

impl Default for RatioMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RatioMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(RatioMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &RatioMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record a successful evaluation and its ratio
    pub fn record_ratio(&self, kind: &str, ratio: f64) {
        self.inner().evaluations.with_label_values(&[kind]).inc();
        self.inner().last_ratio.with_label_values(&[kind]).set(ratio);
    }

    /// Record a failed evaluation
    pub fn record_error(&self, kind: &str, error: &RatioError) {
        self.inner().evaluations.with_label_values(&[kind]).inc();
        self.inner()
            .errors
            .with_label_values(&[error.reason()])
            .inc();
    }

    /// Record how long an evaluation took
    pub fn observe_evaluation_latency(&self, duration_secs: f64) {
        self.inner().evaluation_seconds.observe(duration_secs);
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        use prometheus::{Encoder, TextEncoder};

        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&prometheus::gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Structured logger for ratio evaluations
///
/// Emits one event per evaluation so the outcome can be correlated with
/// the autoscaler that asked for it.
#[derive(Clone)]
pub struct StructuredLogger {
    scope: String,
}

impl StructuredLogger {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    /// Log a request-relative evaluation
    pub fn log_request_ratio(&self, name: &str, target_utilization: i32, result: &RequestRatio) {
        info!(
            event = "request_ratio",
            scope = %self.scope,
            name = %name,
            target_utilization = target_utilization,
            current_utilization = result.current_utilization,
            raw_average = result.raw_average,
            ratio = result.ratio,
            direction = ScaleDirection::from_ratio(result.ratio).as_str(),
            "Computed request utilization ratio"
        );
    }

    /// Log a range-relative evaluation
    pub fn log_range_ratio(&self, name: &str, range: &TargetRange, result: &UsageRatio) {
        info!(
            event = "range_ratio",
            scope = %self.scope,
            name = %name,
            target_lower = range.lower,
            target_upper = range.upper,
            current_usage = result.current_usage,
            ratio = result.ratio,
            direction = ScaleDirection::from_ratio(result.ratio).as_str(),
            "Computed usage ratio"
        );
    }

    /// Log a failed evaluation
    pub fn log_failure(&self, name: &str, kind: &str, error: &RatioError) {
        warn!(
            event = "ratio_failed",
            scope = %self.scope,
            name = %name,
            kind = %kind,
            reason = error.reason(),
            error = %error,
            "Scaling ratio evaluation failed"
        );
    }
}
