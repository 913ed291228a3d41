//! Error types for ratio computation

use thiserror::Error;

/// Errors returned by the ratio calculators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RatioError {
    /// The matched resource requests summed to zero, either because the
    /// metric and request sets were disjoint or every matched request was 0
    #[error("no metrics returned matched known pods")]
    NoMatchedMetrics,

    /// A range ratio was requested over an empty metric set
    #[error("no metrics available to compute an average usage")]
    EmptyMetricSet,

    /// The ratio denominator (target utilization or target usage) is zero
    #[error("target value is zero, ratio is undefined")]
    ZeroTarget,

    /// A metric or request total does not fit in `i64`, or the resulting
    /// utilization percentage does not fit in `i32`
    #[error("value out of range: total exceeds i64 or utilization exceeds i32")]
    Overflow,

    /// Lower bound of a target range is above its upper bound
    #[error("invalid target range: lower bound {lower} exceeds upper bound {upper}")]
    InvalidRange { lower: i64, upper: i64 },
}

impl RatioError {
    /// Short machine-friendly reason, used as a metrics label and log field
    pub fn reason(&self) -> &'static str {
        match self {
            RatioError::NoMatchedMetrics => "no_matched_metrics",
            RatioError::EmptyMetricSet => "empty_metric_set",
            RatioError::ZeroTarget => "zero_target",
            RatioError::Overflow => "overflow",
            RatioError::InvalidRange { .. } => "invalid_range",
        }
    }
}
