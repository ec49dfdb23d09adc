//! Smoke tests -- verify the binary runs and key subcommands exist.

use assert_cmd::Command;

#[test]
fn test_cli_help() {
    Command::cargo_bin("queuepulse")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "Monitoring view over a persisted log",
        ));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("queuepulse")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("queuepulse"));
}

#[test]
fn test_jobs_subcommand_exists() {
    Command::cargo_bin("queuepulse")
        .unwrap()
        .args(["jobs", "--help"])
        .assert()
        .success();
}

#[test]
fn test_metrics_subcommand_exists() {
    Command::cargo_bin("queuepulse")
        .unwrap()
        .args(["metrics", "--help"])
        .assert()
        .success();
}

#[test]
fn test_jobs_rejects_unknown_state() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("smoke.db");

    Command::cargo_bin("queuepulse")
        .unwrap()
        .args(["--db", db.to_str().unwrap(), "jobs", "--state", "exploded"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("state"));
}

#[test]
fn test_metrics_on_empty_database_reports_insufficient_data() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("smoke.db");

    Command::cargo_bin("queuepulse")
        .unwrap()
        .args(["--db", db.to_str().unwrap(), "metrics"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Not enough data yet"));
}
