use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_pagelens_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("pagelens")
}

#[test]
fn test_analyze_help_lists_options() {
    let mut cmd = Command::new(get_pagelens_bin());
    cmd.arg("analyze").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--top"))
        .stdout(predicate::str::contains("--viewport"))
        .stdout(predicate::str::contains("--browserless-token"))
        .stdout(predicate::str::contains("--screenshot"));
}

#[test]
fn test_analyze_rejects_non_http_url() {
    let mut cmd = Command::new(get_pagelens_bin());
    cmd.arg("analyze").arg("ftp://example.com/file");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme"));
}

#[test]
fn test_analyze_rejects_relative_url() {
    let mut cmd = Command::new(get_pagelens_bin());
    cmd.arg("analyze").arg("example.com");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_analyze_requires_url() {
    let mut cmd = Command::new(get_pagelens_bin());
    cmd.arg("analyze");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_analyze_rejects_bad_viewport() {
    let mut cmd = Command::new(get_pagelens_bin());
    cmd.arg("analyze")
        .arg("https://example.com")
        .arg("--viewport")
        .arg("wide");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid viewport"));
}
