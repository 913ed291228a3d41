//! Range-relative usage ratio

use crate::error::RatioError;
use crate::models::{PodMetricsInfo, TargetRange, UsageRatio};
use tracing::debug;

/// Compute the average usage across all pods and compare it against a
/// target range
///
/// Usage inside the range (bounds inclusive) yields a ratio of exactly 1.
/// Outside it, the ratio is taken against the single target value, the
/// lower bound when usage is below the range, or the upper bound when
/// usage is above it.
///
/// # Errors
/// * `EmptyMetricSet` if `metrics` has no entries
/// * `ZeroTarget` if the selected target usage is zero
/// * `Overflow` if the metric total does not fit in `i64`
pub fn compute_range_ratio(
    metrics: &PodMetricsInfo,
    range: TargetRange,
) -> Result<UsageRatio, RatioError> {
    if metrics.is_empty() {
        return Err(RatioError::EmptyMetricSet);
    }

    let metrics_total: i128 = metrics.values().map(|m| i128::from(m.value)).sum();
    let metrics_total = i64::try_from(metrics_total).map_err(|_| RatioError::Overflow)?;

    let current_usage = metrics_total / metrics.len() as i64;

    if range.contains(current_usage) {
        debug!(
            current_usage,
            lower = range.lower,
            upper = range.upper,
            "Usage within target range"
        );
        return Ok(UsageRatio {
            ratio: 1.0,
            current_usage,
        });
    }

    // Single targets and scale-down both measure against the lower bound
    let target_usage = if range.is_single() || current_usage < range.lower {
        range.lower
    } else {
        range.upper
    };

    debug!(current_usage, target_usage, "Selected target usage");

    if target_usage == 0 {
        return Err(RatioError::ZeroTarget);
    }

    Ok(UsageRatio {
        ratio: current_usage as f64 / target_usage as f64,
        current_usage,
    })
}
