//! Request-relative utilization ratio

use crate::error::RatioError;
use crate::models::{PodMetricsInfo, RequestRatio, ResourceRequests};
use tracing::debug;

/// Compute utilization as a percentage of resource requests and compare it
/// against a target utilization percentage
///
/// Only pods present in both `metrics` and `requests` are counted; metrics
/// without a matching request are treated as extraneous and skipped.
///
/// # Errors
/// * `NoMatchedMetrics` if the matched requests sum to zero
/// * `ZeroTarget` if `target_utilization` is zero
/// * `Overflow` if a total does not fit in `i64` or the percentage in `i32`
pub fn compute_request_ratio(
    metrics: &PodMetricsInfo,
    requests: &ResourceRequests,
    target_utilization: i32,
) -> Result<RequestRatio, RatioError> {
    // Widened so the totals do not depend on iteration order
    let mut metrics_total: i128 = 0;
    let mut requests_total: i128 = 0;
    let mut matched: i64 = 0;

    for (pod_name, metric) in metrics {
        let Some(request) = requests.get(pod_name) else {
            continue;
        };

        metrics_total += i128::from(metric.value);
        requests_total += i128::from(*request);
        matched += 1;
    }

    debug!(
        matched,
        skipped = metrics.len() as i64 - matched,
        metrics_total = %metrics_total,
        requests_total = %requests_total,
        "Aggregated pod metrics against requests"
    );

    // Disjoint metric and request sets leave the total at zero
    if requests_total == 0 {
        return Err(RatioError::NoMatchedMetrics);
    }

    let metrics_total = i64::try_from(metrics_total).map_err(|_| RatioError::Overflow)?;
    let requests_total = i64::try_from(requests_total).map_err(|_| RatioError::Overflow)?;

    let scaled = i128::from(metrics_total) * 100 / i128::from(requests_total);
    let current_utilization = i32::try_from(scaled).map_err(|_| RatioError::Overflow)?;

    if target_utilization == 0 {
        return Err(RatioError::ZeroTarget);
    }

    Ok(RequestRatio {
        ratio: f64::from(current_utilization) / f64::from(target_utilization),
        current_utilization,
        raw_average: metrics_total / matched,
    })
}
