//! Core data models for ratio computation

use crate::error::RatioError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Observed metric value for a single pod
///
/// The unit depends on the metric: millicores for CPU, bytes for memory,
/// or whatever scale an external metric reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub value: i64,
}

impl MetricRecord {
    pub fn new(value: i64) -> Self {
        Self { value }
    }
}

impl From<i64> for MetricRecord {
    fn from(value: i64) -> Self {
        Self { value }
    }
}

/// Metric values keyed by pod name
pub type PodMetricsInfo = HashMap<String, MetricRecord>;

/// Resource requests keyed by pod name, in the same unit as the paired metric
pub type ResourceRequests = HashMap<String, i64>;

/// Target usage band for range-relative scaling
///
/// Equal bounds describe a single target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRange {
    pub lower: i64,
    pub upper: i64,
}

impl TargetRange {
    /// Create a range, rejecting a lower bound above the upper bound
    pub fn new(lower: i64, upper: i64) -> Result<Self, RatioError> {
        if lower > upper {
            return Err(RatioError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Create a single-value target
    pub fn single(value: i64) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    pub fn is_single(&self) -> bool {
        self.lower == self.upper
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Result of a request-relative utilization computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequestRatio {
    /// Current utilization divided by the target utilization
    pub ratio: f64,
    /// Aggregate usage as a truncated percentage of aggregate requests
    pub current_utilization: i32,
    /// Truncated mean of the matched metric values
    pub raw_average: i64,
}

/// Result of a range-relative usage computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageRatio {
    /// Current usage divided by the selected target usage
    pub ratio: f64,
    /// Truncated mean of all metric values
    pub current_usage: i64,
}

/// Direction a ratio asks the replica count to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleDirection {
    Up,
    Down,
    Hold,
}

impl ScaleDirection {
    /// Classify a ratio: above 1 scales up, below 1 scales down
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 1.0 {
            ScaleDirection::Up
        } else if ratio < 1.0 {
            ScaleDirection::Down
        } else {
            ScaleDirection::Hold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleDirection::Up => "up",
            ScaleDirection::Down => "down",
            ScaleDirection::Hold => "hold",
        }
    }
}
