//! Batch evaluation command
//!
//! Reads a JSON document of independent evaluations and runs each one.
//! Evaluations never share data; a failure is reported in its own row and
//! does not stop the rest.

use anyhow::{bail, Context, Result};
use ratio_lib::observability::KIND_RANGE;
use ratio_lib::{ResourceRequests, TargetRange};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::evaluator::{EvaluationReport, Evaluator};
use crate::input::{into_pod_metrics, MetricInput};
use crate::output::{print_reports, print_success, print_warning, OutputFormat};

/// Top-level batch document
#[derive(Debug, Deserialize)]
pub struct BatchFile {
    pub evaluations: Vec<BatchEvaluation>,
}

/// A single named evaluation
#[derive(Debug, Deserialize)]
pub struct BatchEvaluation {
    pub name: String,
    #[serde(flatten)]
    pub spec: EvaluationSpec,
}

/// Calculator selection and its inputs
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EvaluationSpec {
    Request {
        metrics: HashMap<String, MetricInput>,
        requests: ResourceRequests,
        #[serde(default)]
        target_utilization: Option<i32>,
    },
    Range {
        metrics: HashMap<String, MetricInput>,
        lower: i64,
        upper: i64,
    },
}

/// Parse a batch document
pub fn parse_batch(content: &str) -> Result<BatchFile> {
    serde_json::from_str(content).context("Failed to parse batch file")
}

/// Run every evaluation in the batch and collect one report per entry
pub fn evaluate_batch(
    evaluator: &Evaluator,
    batch: BatchFile,
    default_target_utilization: i32,
) -> Vec<EvaluationReport> {
    batch
        .evaluations
        .into_iter()
        .map(|evaluation| match evaluation.spec {
            EvaluationSpec::Request {
                metrics,
                requests,
                target_utilization,
            } => {
                let target = target_utilization.unwrap_or(default_target_utilization);
                let metrics = into_pod_metrics(metrics);
                let result = evaluator.request(&evaluation.name, &metrics, &requests, target);
                EvaluationReport::from_request(&evaluation.name, target, &result)
            }
            EvaluationSpec::Range {
                metrics,
                lower,
                upper,
            } => match TargetRange::new(lower, upper) {
                Ok(range) => {
                    let metrics = into_pod_metrics(metrics);
                    let result = evaluator.range(&evaluation.name, &metrics, range);
                    EvaluationReport::from_range(&evaluation.name, &range, &result)
                }
                Err(e) => EvaluationReport::failed(
                    &evaluation.name,
                    KIND_RANGE,
                    format!("{}..{}", lower, upper),
                    e.to_string(),
                ),
            },
        })
        .collect()
}

/// Evaluate a batch file and print the results
pub async fn run_batch(
    evaluator: &Evaluator,
    path: &Path,
    default_target_utilization: i32,
    format: OutputFormat,
) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;
    let batch = parse_batch(&content)?;

    let reports = evaluate_batch(evaluator, batch, default_target_utilization);
    print_reports(&reports, format);

    let failed = reports.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        if format == OutputFormat::Table {
            print_warning(&format!("{} of {} evaluations failed", failed, reports.len()));
        }
        bail!("{} of {} evaluations failed", failed, reports.len());
    }

    if format == OutputFormat::Table {
        print_success(&format!("{} evaluations completed", reports.len()));
    }
    Ok(())
}
