//! Input file parsing
//!
//! Metric and request files are JSON objects keyed by pod name. Metric
//! values may be written either as a bare integer or as `{"value": n}`.

use anyhow::{Context, Result};
use ratio_lib::{MetricRecord, PodMetricsInfo, ResourceRequests};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// A metric value as written in an input file
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum MetricInput {
    Plain(i64),
    Record(MetricRecord),
}

impl From<MetricInput> for MetricRecord {
    fn from(input: MetricInput) -> Self {
        match input {
            MetricInput::Plain(value) => MetricRecord::new(value),
            MetricInput::Record(record) => record,
        }
    }
}

/// Convert raw file entries into the metric map the calculators take
pub fn into_pod_metrics(raw: HashMap<String, MetricInput>) -> PodMetricsInfo {
    raw.into_iter()
        .map(|(pod, input)| (pod, MetricRecord::from(input)))
        .collect()
}

/// Parse a metrics document
pub fn parse_metrics(content: &str) -> Result<PodMetricsInfo> {
    let raw: HashMap<String, MetricInput> =
        serde_json::from_str(content).context("Failed to parse metrics")?;
    Ok(into_pod_metrics(raw))
}

/// Parse a resource requests document
pub fn parse_requests(content: &str) -> Result<ResourceRequests> {
    serde_json::from_str(content).context("Failed to parse resource requests")
}

/// Read per-pod metric values from a JSON file
pub async fn read_metrics(path: &Path) -> Result<PodMetricsInfo> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read metrics file {}", path.display()))?;
    parse_metrics(&content)
}

/// Read per-pod resource requests from a JSON file
pub async fn read_requests(path: &Path) -> Result<ResourceRequests> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read requests file {}", path.display()))?;
    parse_requests(&content)
}
