//! Scaling ratio CLI
//!
//! A command-line tool for evaluating the autoscaling ratio of a set of
//! pods, either against their resource requests or against a target
//! usage range.

mod commands;
mod config;
mod evaluator;
mod input;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{batch, range, request};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Scaling ratio CLI
#[derive(Parser)]
#[command(name = "ratioctl")]
#[command(author, version, about = "Scaling ratio calculator for resource-based autoscaling", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ~/.config/ratioctl/config.toml)
    #[arg(long, env = "RATIOCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Write logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Print Prometheus metrics after the evaluation
    #[arg(long)]
    pub emit_metrics: bool,

    /// Scope attached to log events (e.g. the autoscaler name)
    #[arg(long, default_value = "ratioctl")]
    pub scope: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare utilization against per-pod resource requests
    Request {
        /// JSON file mapping pod name to metric value
        #[arg(long, short)]
        metrics: PathBuf,

        /// JSON file mapping pod name to resource request
        #[arg(long, short)]
        requests: PathBuf,

        /// Target utilization percentage (defaults to the configured value)
        #[arg(long, short)]
        target: Option<i32>,

        /// Name shown in output and logs
        #[arg(long, default_value = "request")]
        name: String,
    },

    /// Compare average usage against a target value or range
    Range {
        /// JSON file mapping pod name to metric value
        #[arg(long, short)]
        metrics: PathBuf,

        /// Lower bound of the target range
        #[arg(long, allow_negative_numbers = true)]
        lower: Option<i64>,

        /// Upper bound of the target range
        #[arg(long, allow_negative_numbers = true)]
        upper: Option<i64>,

        /// Single target value
        #[arg(long, allow_negative_numbers = true)]
        value: Option<i64>,

        /// Name shown in output and logs
        #[arg(long, default_value = "range")]
        name: String,
    },

    /// Evaluate a JSON file of independent evaluations
    Batch {
        /// Batch file path
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);

    let config = config::CliConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    let format = output::OutputFormat::resolve(cli.format, config.default_format.as_deref());
    let evaluator = evaluator::Evaluator::new(&cli.scope);

    let outcome = match cli.command {
        Commands::Request {
            metrics,
            requests,
            target,
            name,
        } => {
            let target = target.unwrap_or(config.default_target_utilization);
            request::run_request(&evaluator, &name, &metrics, &requests, target, format).await
        }
        Commands::Range {
            metrics,
            lower,
            upper,
            value,
            name,
        } => {
            let target = range::target_range(lower, upper, value)?;
            range::run_range(&evaluator, &name, &metrics, target, format).await
        }
        Commands::Batch { file } => {
            batch::run_batch(&evaluator, &file, config.default_target_utilization, format).await
        }
    };

    if cli.emit_metrics {
        print!("{}", evaluator.metrics().encode_text()?);
    }

    outcome
}
