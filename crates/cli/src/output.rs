//! Output formatting utilities

use crate::evaluator::EvaluationReport;
use clap::ValueEnum;
use colored::Colorize;
use ratio_lib::ScaleDirection;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Resolve the effective format: flag, then configured default, then table
    pub fn resolve(flag: Option<OutputFormat>, configured: Option<&str>) -> OutputFormat {
        flag.or_else(|| configured.and_then(|s| OutputFormat::from_str(s, true).ok()))
            .unwrap_or_default()
    }
}

/// Row for the evaluations table
#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Scale")]
    direction: String,
}

impl From<&EvaluationReport> for ReportRow {
    fn from(report: &EvaluationReport) -> Self {
        let current = report
            .current_utilization
            .map(|u| format!("{}%", u))
            .or_else(|| report.current_usage.map(|u| u.to_string()))
            .unwrap_or_else(|| "-".to_string());

        let (ratio, direction) = match (&report.error, report.ratio, report.direction) {
            (Some(err), _, _) => ("-".to_string(), err.red().to_string()),
            (None, Some(ratio), Some(direction)) => {
                (format_ratio(ratio), color_direction(direction))
            }
            _ => ("-".to_string(), "-".to_string()),
        };

        Self {
            name: report.name.clone(),
            kind: report.kind.to_string(),
            target: report.target.clone(),
            current,
            ratio,
            direction,
        }
    }
}

/// Print evaluation reports as a table or JSON array
pub fn print_reports(reports: &[EvaluationReport], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if reports.is_empty() {
                println!("{}", "No evaluations found".yellow());
                return;
            }
            let rows: Vec<ReportRow> = reports.iter().map(ReportRow::from).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(reports) {
                println!("{}", json);
            }
        }
    }
}

/// Print a single evaluation report
pub fn print_report(report: &EvaluationReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(report) {
                println!("{}", json);
            }
        }
        OutputFormat::Table => {
            println!("{}", "Scaling Ratio".bold());
            println!("{}", "=".repeat(40));
            println!("Name:                {}", report.name.cyan());
            println!("Kind:                {}", report.kind);
            println!("Target:              {}", report.target);

            if let Some(utilization) = report.current_utilization {
                println!("Current utilization: {}%", utilization);
            }
            if let Some(average) = report.raw_average {
                println!("Raw average:         {}", average);
            }
            if let Some(usage) = report.current_usage {
                println!("Current usage:       {}", usage);
            }

            // Failures are returned to the caller and reported once there
            if let (Some(ratio), Some(direction)) = (report.ratio, report.direction) {
                println!();
                println!(
                    "{} {} ({})",
                    "Ratio:".bold(),
                    format_ratio(ratio).bold(),
                    color_direction(direction)
                );
            }
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Format a ratio for display
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.3}", ratio)
}

/// Color a scale direction
pub fn color_direction(direction: ScaleDirection) -> String {
    match direction {
        ScaleDirection::Up => "up".red().to_string(),
        ScaleDirection::Down => "down".blue().to_string(),
        ScaleDirection::Hold => "hold".green().to_string(),
    }
}
