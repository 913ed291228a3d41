//! Instrumented wrapper around the ratio calculators

use ratio_lib::observability::{KIND_RANGE, KIND_REQUEST};
use ratio_lib::{
    compute_range_ratio, compute_request_ratio, PodMetricsInfo, RatioError, RatioMetrics,
    RequestRatio, ResourceRequests, ScaleDirection, StructuredLogger, TargetRange, UsageRatio,
};
use serde::Serialize;
use std::time::Instant;

/// Runs the calculators and records metrics and log events for each call
pub struct Evaluator {
    metrics: RatioMetrics,
    logger: StructuredLogger,
}

impl Evaluator {
    pub fn new(scope: &str) -> Self {
        Self {
            metrics: RatioMetrics::new(),
            logger: StructuredLogger::new(scope),
        }
    }

    pub fn metrics(&self) -> &RatioMetrics {
        &self.metrics
    }

    /// Evaluate a request-relative utilization ratio
    pub fn request(
        &self,
        name: &str,
        metrics: &PodMetricsInfo,
        requests: &ResourceRequests,
        target_utilization: i32,
    ) -> Result<RequestRatio, RatioError> {
        let start = Instant::now();
        let result = compute_request_ratio(metrics, requests, target_utilization);
        self.metrics
            .observe_evaluation_latency(start.elapsed().as_secs_f64());

        match &result {
            Ok(ratio) => {
                self.metrics.record_ratio(KIND_REQUEST, ratio.ratio);
                self.logger
                    .log_request_ratio(name, target_utilization, ratio);
            }
            Err(e) => {
                self.metrics.record_error(KIND_REQUEST, e);
                self.logger.log_failure(name, KIND_REQUEST, e);
            }
        }

        result
    }

    /// Evaluate a range-relative usage ratio
    pub fn range(
        &self,
        name: &str,
        metrics: &PodMetricsInfo,
        range: TargetRange,
    ) -> Result<UsageRatio, RatioError> {
        let start = Instant::now();
        let result = compute_range_ratio(metrics, range);
        self.metrics
            .observe_evaluation_latency(start.elapsed().as_secs_f64());

        match &result {
            Ok(ratio) => {
                self.metrics.record_ratio(KIND_RANGE, ratio.ratio);
                self.logger.log_range_ratio(name, &range, ratio);
            }
            Err(e) => {
                self.metrics.record_error(KIND_RANGE, e);
                self.logger.log_failure(name, KIND_RANGE, e);
            }
        }

        result
    }
}

/// Printable outcome of a single evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub name: String,
    pub kind: &'static str,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_utilization: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_average: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_usage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<ScaleDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationReport {
    pub fn from_request(
        name: &str,
        target_utilization: i32,
        result: &Result<RequestRatio, RatioError>,
    ) -> Self {
        let mut report = Self::empty(name, KIND_REQUEST, format!("{}%", target_utilization));
        match result {
            Ok(r) => {
                report.ratio = Some(r.ratio);
                report.current_utilization = Some(r.current_utilization);
                report.raw_average = Some(r.raw_average);
                report.direction = Some(ScaleDirection::from_ratio(r.ratio));
            }
            Err(e) => report.error = Some(e.to_string()),
        }
        report
    }

    pub fn from_range(
        name: &str,
        range: &TargetRange,
        result: &Result<UsageRatio, RatioError>,
    ) -> Self {
        let mut report = Self::empty(name, KIND_RANGE, format_range(range));
        match result {
            Ok(r) => {
                report.ratio = Some(r.ratio);
                report.current_usage = Some(r.current_usage);
                report.direction = Some(ScaleDirection::from_ratio(r.ratio));
            }
            Err(e) => report.error = Some(e.to_string()),
        }
        report
    }

    /// Report for an evaluation that never reached a calculator
    pub fn failed(name: &str, kind: &'static str, target: String, error: String) -> Self {
        let mut report = Self::empty(name, kind, target);
        report.error = Some(error);
        report
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn empty(name: &str, kind: &'static str, target: String) -> Self {
        Self {
            name: name.to_string(),
            kind,
            target,
            ratio: None,
            current_utilization: None,
            raw_average: None,
            current_usage: None,
            direction: None,
            error: None,
        }
    }
}

/// Format a target range, collapsing single-value targets
pub fn format_range(range: &TargetRange) -> String {
    if range.is_single() {
        range.lower.to_string()
    } else {
        format!("{}..{}", range.lower, range.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratio_lib::MetricRecord;

    fn pods(entries: &[(&str, i64)]) -> PodMetricsInfo {
        entries
            .iter()
            .map(|(pod, v)| (pod.to_string(), MetricRecord::new(*v)))
            .collect()
    }

    #[test]
    fn test_request_report() {
        let evaluator = Evaluator::new("test");
        let requests: ResourceRequests =
            [("a".to_string(), 100), ("b".to_string(), 100)].into_iter().collect();
        let result = evaluator.request("web", &pods(&[("a", 50), ("b", 150)]), &requests, 50);

        let report = EvaluationReport::from_request("web", 50, &result);
        assert_eq!(report.ratio, Some(2.0));
        assert_eq!(report.current_utilization, Some(100));
        assert_eq!(report.direction, Some(ScaleDirection::Up));
        assert_eq!(report.target, "50%");
        assert!(!report.is_error());
    }

    #[test]
    fn test_failed_range_report() {
        let evaluator = Evaluator::new("test");
        let range = TargetRange::single(20);
        let result = evaluator.range("queue", &PodMetricsInfo::new(), range);

        let report = EvaluationReport::from_range("queue", &range, &result);
        assert!(report.is_error());
        assert!(report.ratio.is_none());
        assert_eq!(report.target, "20");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(&TargetRange::new(20, 40).unwrap()), "20..40");
        assert_eq!(format_range(&TargetRange::single(7)), "7");
    }
}
