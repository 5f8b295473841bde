//! Binary-level tests for the `workout` command.

use std::net::TcpListener;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn workout(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("workout").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("WORKOUT_BACKEND_URL")
        .env_remove("WORKOUT_LOG");
    cmd
}

/// A URL nothing is listening on.
fn unreachable_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();

    workout(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("workout"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("start"));
}

#[test]
fn config_show_uses_defaults_when_file_missing() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("missing.yaml");

    workout(&home)
        .args(["config", "show", "-o", "json", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8080"))
        .stdout(predicate::str::contains("tick_interval_ms"));
}

#[test]
fn backend_url_env_overrides_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.yaml");
    std::fs::write(&config, "api:\n  backend_url: http://from-file:1\n").unwrap();

    workout(&home)
        .env("WORKOUT_BACKEND_URL", "http://from-env:2")
        .args(["config", "show", "-o", "json", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("http://from-env:2"))
        .stdout(predicate::str::contains("from-file").not());
}

#[test]
fn config_init_writes_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.yaml");

    workout(&home)
        .args(["config", "init", "--config"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    workout(&home)
        .args(["config", "init", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn list_reports_fetch_failure() {
    let home = TempDir::new().unwrap();

    workout(&home)
        .args(["list", "--backend-url"])
        .arg(unreachable_backend())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("Failed to fetch workouts"));
}

#[test]
fn show_reports_fetch_failure() {
    let home = TempDir::new().unwrap();

    workout(&home)
        .args(["show", "7", "--backend-url"])
        .arg(unreachable_backend())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch exercises"));
}

#[test]
fn malformed_config_is_an_error() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.yaml");
    std::fs::write(&config, "api: [not, a, map]\n").unwrap();

    workout(&home)
        .args(["config", "show", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
