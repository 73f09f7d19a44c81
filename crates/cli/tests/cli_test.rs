//! Basic CLI integration tests.

#![allow(deprecated)] // Command::cargo_bin deprecated for custom build-dir; still works for default

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Empty config file so the user's own config never leaks into a test.
fn empty_config() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();
    (dir, path)
}

fn cmd(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("progress-report").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    std::str::from_utf8(stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).expect("each line should be a JSON report"))
        .collect()
}

#[test]
fn help_prints_and_exits_success() {
    Command::cargo_bin("progress-report")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn emit_with_progress_json() {
    let (_dir, config) = empty_config();
    let out = cmd(&config)
        .args(["--json", "emit", "--message", "Loading", "--value", "50", "--max", "100"])
        .assert()
        .success();
    let reports = json_lines(&out.get_output().stdout);
    assert_eq!(
        reports,
        vec![serde_json::json!({
            "message": "Loading",
            "value": 50.0,
            "maximum": 100.0,
            "state": "normal"
        })]
    );
}

#[test]
fn emit_message_only_uses_defaults() {
    let (_dir, config) = empty_config();
    let out = cmd(&config)
        .args(["emit", "--json", "-m", "Loading"])
        .assert()
        .success();
    let reports = json_lines(&out.get_output().stdout);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["value"], 0.0);
    assert_eq!(reports[0]["maximum"], 0.0);
    assert_eq!(reports[0]["state"], "normal");
}

#[test]
fn emit_state_text_output() {
    let (_dir, config) = empty_config();
    let out = cmd(&config)
        .args(["emit", "--message", "Waiting", "--state", "paused"])
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    assert_eq!(stdout, "[paused] Waiting\n");
}

#[test]
fn emit_value_without_max_fails() {
    let (_dir, config) = empty_config();
    cmd(&config)
        .args(["emit", "--message", "x", "--value", "5"])
        .assert()
        .failure();
}

#[test]
fn emit_unknown_state_fails() {
    let (_dir, config) = empty_config();
    cmd(&config)
        .args(["emit", "--message", "x", "--state", "finished"])
        .assert()
        .failure();
}

#[test]
fn error_reports_error_state_without_message() {
    let (_dir, config) = empty_config();
    let out = cmd(&config).args(["--json", "error"]).assert().success();
    let reports = json_lines(&out.get_output().stdout);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["state"], "error");
    assert!(reports[0]["message"].is_null());
}

#[test]
fn simulate_reports_every_step() {
    let (_dir, config) = empty_config();
    let out = cmd(&config)
        .args(["--json", "simulate", "--steps", "3"])
        .assert()
        .success();
    let reports = json_lines(&out.get_output().stdout);
    let states: Vec<&str> = reports.iter().map(|r| r["state"].as_str().unwrap()).collect();
    assert_eq!(
        states,
        vec!["indeterminate", "normal", "normal", "normal", "normal"]
    );
    assert_eq!(reports[2]["value"], 2.0);
    assert_eq!(reports[2]["maximum"], 3.0);
}

#[test]
fn simulate_fail_at_ends_with_error_report() {
    let (_dir, config) = empty_config();
    let out = cmd(&config)
        .args(["--json", "simulate", "--steps", "5", "--fail-at", "2"])
        .assert()
        .failure();
    let reports = json_lines(&out.get_output().stdout);
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[2]["state"], "error");
    let stderr = std::str::from_utf8(&out.get_output().stderr).unwrap();
    assert!(stderr.contains("failed at step 2"));
}

#[test]
fn config_json_display_applies_without_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[display]\njson = true\n").unwrap();
    let out = cmd(&config).args(["emit", "-m", "hi"]).assert().success();
    let reports = json_lines(&out.get_output().stdout);
    assert_eq!(reports[0]["message"], "hi");
}

#[test]
fn config_show_json_valid() {
    let (_dir, config) = empty_config();
    let out = cmd(&config)
        .args(["config", "show", "--json"])
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(stdout).expect("config show --json should output valid JSON");
    assert_eq!(v["simulate"]["steps"], 10);
}

#[test]
fn config_init_then_set() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("config.toml");
    cmd(&config).args(["config", "init"]).assert().success();
    cmd(&config)
        .args(["config", "set", "simulate.steps", "4"])
        .assert()
        .success();
    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("steps = 4"));
}

#[test]
fn invalid_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[display\njson = ").unwrap();
    cmd(&config).args(["emit", "-m", "x"]).assert().failure();
}

#[test]
fn emit_non_finite_bounds_json_reads_back() {
    let (_dir, config) = empty_config();
    let out = cmd(&config)
        .args(["--json", "emit", "-m", "x", "--value", "nan", "--max", "inf"])
        .assert()
        .success();
    let reports = json_lines(&out.get_output().stdout);
    assert_eq!(reports[0]["value"], "NaN");
    assert_eq!(reports[0]["maximum"], "inf");
}

#[test]
fn emit_value_with_zero_maximum_stays_visible() {
    let (_dir, config) = empty_config();
    let out = cmd(&config)
        .args(["emit", "-m", "x", "--value", "5", "--max", "0"])
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    assert_eq!(stdout, "[normal] x 5/0\n");
}

// dirs::config_dir honours XDG_CONFIG_HOME on Linux only.
#[cfg(target_os = "linux")]
#[test]
fn malformed_default_config_falls_back_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let app_dir = dir.path().join("progress-provider");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(app_dir.join("config.toml"), "[display\njson = ").unwrap();

    let out = Command::cargo_bin("progress-report")
        .unwrap()
        .env("XDG_CONFIG_HOME", dir.path())
        .env("RUST_LOG", "warn")
        .env("NO_COLOR", "1")
        .args(["emit", "-m", "hi"])
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    assert_eq!(stdout, "[normal] hi\n");
    let stderr = std::str::from_utf8(&out.get_output().stderr).unwrap();
    assert!(stderr.contains("WARN"));
    assert!(stderr.contains("using defaults"));
}

#[test]
fn simulate_without_terminal_prints_text_even_with_bar_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[display]\nprogress_bar = true\n").unwrap();
    let out = cmd(&config)
        .args(["simulate", "-m", "Copy", "--steps", "2"])
        .assert()
        .success();
    let stdout = std::str::from_utf8(&out.get_output().stdout).unwrap();
    assert_eq!(
        stdout,
        "[indeterminate] Copy: starting\n\
         [normal] Copy 1/2 (50.0%)\n\
         [normal] Copy 2/2 (100.0%)\n\
         [normal] Copy: done 2/2 (100.0%)\n"
    );
}
