//! Request-relative ratio command

use anyhow::{Context, Result};
use std::path::Path;

use crate::evaluator::{EvaluationReport, Evaluator};
use crate::input::{read_metrics, read_requests};
use crate::output::{print_report, OutputFormat};

/// Evaluate pod metrics against their resource requests
pub async fn run_request(
    evaluator: &Evaluator,
    name: &str,
    metrics_path: &Path,
    requests_path: &Path,
    target_utilization: i32,
    format: OutputFormat,
) -> Result<()> {
    let metrics = read_metrics(metrics_path).await?;
    let requests = read_requests(requests_path).await?;

    let result = evaluator.request(name, &metrics, &requests, target_utilization);
    print_report(
        &EvaluationReport::from_request(name, target_utilization, &result),
        format,
    );

    result
        .map(|_| ())
        .with_context(|| format!("Request ratio evaluation '{}' failed", name))
}
