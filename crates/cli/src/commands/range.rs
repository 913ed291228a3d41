//! Range-relative ratio command

use anyhow::{bail, Context, Result};
use ratio_lib::TargetRange;
use std::path::Path;

use crate::evaluator::{EvaluationReport, Evaluator};
use crate::input::read_metrics;
use crate::output::{print_report, OutputFormat};

/// Build a target range from `--lower/--upper` or `--value`
pub fn target_range(
    lower: Option<i64>,
    upper: Option<i64>,
    value: Option<i64>,
) -> Result<TargetRange> {
    match (lower, upper, value) {
        (None, None, Some(v)) => Ok(TargetRange::single(v)),
        (Some(l), Some(u), None) => Ok(TargetRange::new(l, u)?),
        (None, None, None) => bail!("A target is required: pass --value or --lower and --upper"),
        _ => bail!("Pass either --value or both --lower and --upper"),
    }
}

/// Evaluate average pod usage against a target range
pub async fn run_range(
    evaluator: &Evaluator,
    name: &str,
    metrics_path: &Path,
    range: TargetRange,
    format: OutputFormat,
) -> Result<()> {
    let metrics = read_metrics(metrics_path).await?;

    let result = evaluator.range(name, &metrics, range);
    print_report(&EvaluationReport::from_range(name, &range, &result), format);

    result
        .map(|_| ())
        .with_context(|| format!("Range ratio evaluation '{}' failed", name))
}
