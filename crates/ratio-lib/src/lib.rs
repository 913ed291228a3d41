//! Scaling ratio kernel for resource-based autoscaling
//!
//! This crate provides the arithmetic core of a horizontal autoscaler:
//! - Request-relative utilization ratios (usage vs. per-pod resource requests)
//! - Range-relative usage ratios (usage vs. a target value or band)
//! - Structured logging and Prometheus metrics for evaluations
//!
//! Metric collection, pod discovery and replica computation live elsewhere;
//! callers hand in already-collected maps and get back ratios.

pub mod error;
pub mod models;
pub mod observability;
pub mod ratio;

pub use error::RatioError;
pub use models::*;
pub use observability::{RatioMetrics, StructuredLogger};
pub use ratio::{compute_range_ratio, compute_request_ratio};
