use assert_cmd::Command;
use predicates::prelude::*;

fn integration_enabled() -> bool {
    std::env::var("CAREERPACT_INTEGRATION").is_ok()
}

#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("careerpact").unwrap();
    cmd.env_remove("CAREERPACT_API_URL").env_remove("RUST_LOG");
    cmd
}

// --- Help & version ---

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task progress and badge client"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("careerpact"));
}

#[test]
fn profile_set_help_lists_flags() {
    cmd()
        .args(["profile", "set", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--hours"))
        .stdout(predicate::str::contains("--skill"));
}

// --- Argument and config validation ---

#[test]
fn subcommand_required() {
    cmd().assert().failure().code(2);
}

#[test]
fn weekly_hours_out_of_range() {
    cmd()
        .args(["profile", "set", "--hours", "50"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("50"));
}

#[test]
fn unknown_skill_rejected() {
    cmd()
        .args(["profile", "set", "--hours", "5", "--skill", "cooking"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown skill"));
}

#[test]
fn explicit_config_must_exist() {
    let tmp = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(&tmp)
        .args(["--config", "missing.toml", "tasks"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_config_file_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("careerpact.toml"), "timeout_secs = 0\n").unwrap();
    cmd()
        .current_dir(&tmp)
        .arg("tasks")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("timeout_secs must be > 0"));
}

#[test]
fn non_http_api_url_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(&tmp)
        .args(["--api-url", "ftp://example.com", "progress"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("api_url must start with"));
}

// --- Unreachable backend ---

#[test]
fn unreachable_backend_degrades_listing() {
    if !integration_enabled() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(&tmp)
        .args(["--api-url", "http://127.0.0.1:9", "tasks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet"))
        .stderr(predicate::str::contains("failed to load tasks"));
}

#[test]
fn unreachable_backend_fails_transition() {
    if !integration_enabled() {
        return;
    }
    let tmp = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(&tmp)
        .args(["--api-url", "http://127.0.0.1:9", "start", "task_1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("remote service error"));
}
