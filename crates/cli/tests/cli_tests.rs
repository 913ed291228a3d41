//! CLI integration tests

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the built binary with an isolated (absent) config file
fn ratioctl(dir: &TempDir, args: &[&str]) -> Output {
    let config = dir.path().join("absent.toml");
    Command::new(env!("CARGO_BIN_EXE_ratioctl"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RATIOCTL_DEFAULT_TARGET_UTILIZATION")
        .env_remove("RATIOCTL_DEFAULT_FORMAT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute command")
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = ratioctl(&dir, &["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("request"), "Should show request command");
    assert!(stdout.contains("range"), "Should show range command");
    assert!(stdout.contains("batch"), "Should show batch command");
}

#[test]
fn test_request_ratio_json() {
    let dir = TempDir::new().unwrap();
    let metrics = write_file(dir.path(), "metrics.json", r#"{"a": 50, "b": 150}"#);
    let requests = write_file(dir.path(), "requests.json", r#"{"a": 100, "b": 100}"#);

    let output = ratioctl(
        &dir,
        &[
            "--format",
            "json",
            "request",
            "--metrics",
            metrics.to_str().unwrap(),
            "--requests",
            requests.to_str().unwrap(),
            "--target",
            "50",
        ],
    );

    assert!(output.status.success(), "request should succeed");
    let report = stdout_json(&output);
    assert_eq!(report["ratio"], 2.0);
    assert_eq!(report["current_utilization"], 100);
    assert_eq!(report["raw_average"], 100);
    assert_eq!(report["direction"], "up");
}

#[test]
fn test_request_uses_configured_default_target() {
    let dir = TempDir::new().unwrap();
    let metrics = write_file(dir.path(), "metrics.json", r#"{"a": 40}"#);
    let requests = write_file(dir.path(), "requests.json", r#"{"a": 100}"#);

    let output = ratioctl(
        &dir,
        &[
            "--format",
            "json",
            "request",
            "--metrics",
            metrics.to_str().unwrap(),
            "--requests",
            requests.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["target"], "80%");
    assert_eq!(report["ratio"], 0.5);
}

#[test]
fn test_disjoint_pods_fail() {
    let dir = TempDir::new().unwrap();
    let metrics = write_file(dir.path(), "metrics.json", r#"{"a": 10}"#);
    let requests = write_file(dir.path(), "requests.json", r#"{"b": 100}"#);

    let output = ratioctl(
        &dir,
        &[
            "request",
            "--metrics",
            metrics.to_str().unwrap(),
            "--requests",
            requests.to_str().unwrap(),
            "--target",
            "50",
        ],
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success(), "disjoint pods should fail");
    assert_eq!(
        stderr.matches("no metrics returned matched known pods").count(),
        1,
        "error should be reported once"
    );
}

#[test]
fn test_request_ratio_table() {
    let dir = TempDir::new().unwrap();
    let metrics = write_file(dir.path(), "metrics.json", r#"{"a": 50, "b": 150}"#);
    let requests = write_file(dir.path(), "requests.json", r#"{"a": 100, "b": 100}"#);

    let output = ratioctl(
        &dir,
        &[
            "--format",
            "table",
            "request",
            "--metrics",
            metrics.to_str().unwrap(),
            "--requests",
            requests.to_str().unwrap(),
            "--target",
            "50",
        ],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "request should succeed");
    assert!(stdout.contains("Current utilization: 100%"));

    let ratio_line = stdout
        .lines()
        .find(|line| line.contains("Ratio:"))
        .expect("Should show a Ratio line");
    assert!(ratio_line.contains("2.000"));
    assert!(ratio_line.contains("up"));
}

#[test]
fn test_log_json_emits_structured_events() {
    let dir = TempDir::new().unwrap();
    let metrics = write_file(dir.path(), "metrics.json", r#"{"a": 30, "b": 30}"#);

    let output = ratioctl(
        &dir,
        &[
            "--log-json",
            "--verbose",
            "--scope",
            "default/worker",
            "range",
            "--metrics",
            metrics.to_str().unwrap(),
            "--value",
            "30",
        ],
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let event = stderr
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|v| v["fields"]["event"] == "range_ratio")
        .expect("Should log a range_ratio JSON event");

    assert_eq!(event["fields"]["scope"], "default/worker");
    assert_eq!(event["fields"]["direction"], "hold");
}

#[test]
fn test_range_single_target() {
    let dir = TempDir::new().unwrap();
    let metrics = write_file(dir.path(), "metrics.json", r#"{"a": 10, "b": {"value": 10}}"#);

    let output = ratioctl(
        &dir,
        &[
            "--format",
            "json",
            "range",
            "--metrics",
            metrics.to_str().unwrap(),
            "--value",
            "20",
        ],
    );

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["ratio"], 0.5);
    assert_eq!(report["current_usage"], 10);
    assert_eq!(report["direction"], "down");
}

#[test]
fn test_range_requires_target() {
    let dir = TempDir::new().unwrap();
    let metrics = write_file(dir.path(), "metrics.json", r#"{"a": 10}"#);

    let output = ratioctl(
        &dir,
        &["range", "--metrics", metrics.to_str().unwrap(), "--lower", "5"],
    );

    assert!(!output.status.success());
}

#[test]
fn test_batch_reports_every_evaluation() {
    let dir = TempDir::new().unwrap();
    let batch = write_file(
        dir.path(),
        "batch.json",
        r#"{
            "evaluations": [
                {
                    "name": "cpu",
                    "kind": "request",
                    "metrics": {"a": 50, "b": 150},
                    "requests": {"a": 100, "b": 100},
                    "target_utilization": 50
                },
                {
                    "name": "queue",
                    "kind": "range",
                    "metrics": {},
                    "lower": 20,
                    "upper": 40
                }
            ]
        }"#,
    );

    let output = ratioctl(&dir, &["--format", "json", "batch", batch.to_str().unwrap()]);

    assert!(!output.status.success(), "a failed evaluation fails the batch");
    let reports = stdout_json(&output);
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["ratio"], 2.0);
    assert!(reports[1]["error"].is_string());
}

#[test]
fn test_emit_metrics() {
    let dir = TempDir::new().unwrap();
    let metrics = write_file(dir.path(), "metrics.json", r#"{"a": 30, "b": 30}"#);

    let output = ratioctl(
        &dir,
        &[
            "--emit-metrics",
            "range",
            "--metrics",
            metrics.to_str().unwrap(),
            "--lower",
            "20",
            "--upper",
            "40",
        ],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("scaling_ratio_evaluations_total"));
}
