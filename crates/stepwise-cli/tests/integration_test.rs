use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn stepwise(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("stepwise"));
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("STEPWISE_LOG");
    cmd
}

#[test]
fn test_main_with_no_args_shows_help() {
    let tmp = TempDir::new().unwrap();
    stepwise(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_main_with_help_flag() {
    let tmp = TempDir::new().unwrap();
    stepwise(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stepwise"));
}

#[test]
fn test_commands_require_init() {
    let tmp = TempDir::new().unwrap();
    let commands: [&[&str]; 5] = [&["up"], &["down"], &["migrate", "up"], &["status"], &["log"]];
    for command in commands {
        stepwise(tmp.path())
            .args(command)
            .assert()
            .failure()
            .stderr(predicate::str::contains("stepwise init"));
    }
}

#[test]
fn test_down_rejects_count_with_all() {
    let tmp = TempDir::new().unwrap();
    stepwise(tmp.path())
        .args(["down", "-n", "2", "--all"])
        .assert()
        .failure();
}

#[test]
fn test_migrate_rejects_unknown_direction() {
    let tmp = TempDir::new().unwrap();
    stepwise(tmp.path())
        .args(["migrate", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown migration direction 'sideways'"));
}

#[cfg(unix)]
#[test]
fn test_migrate_runs_both_directions() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    stepwise(root).arg("init").assert().success();
    for name in ["one", "two"] {
        stepwise(root)
            .args(["new", "-m", name, "--up", format!("mkdir {name}").as_str()])
            .args(["--down", format!("rmdir {name}").as_str()])
            .assert()
            .success();
    }

    stepwise(root)
        .args(["migrate", "up", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 1 migration"));
    assert!(root.join("one").is_dir());
    assert!(!root.join("two").exists());

    stepwise(root).args(["migrate", "UP"]).assert().success();
    assert!(root.join("two").is_dir());

    stepwise(root)
        .args(["migrate", "down", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reverted 2 migrations"));
    assert!(!root.join("one").exists());
    assert!(!root.join("two").exists());
}

#[test]
fn test_up_rejects_zero_count() {
    let tmp = TempDir::new().unwrap();
    stepwise(tmp.path())
        .args(["up", "-n", "0"])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn test_full_lifecycle() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    stepwise(root).arg("init").assert().success();
    assert!(root.join("stepwise.json").exists());

    stepwise(root)
        .args(["new", "-m", "create data", "--up", "mkdir data", "--down", "rmdir data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0001_create_data.json"));
    stepwise(root)
        .args(["new", "-m", "create logs", "--up", "mkdir logs", "--down", "rmdir logs"])
        .assert()
        .success();

    stepwise(root)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending migrations: 2"));

    stepwise(root)
        .arg("up")
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 2 migrations"));
    assert!(root.join("data").is_dir());
    assert!(root.join("logs").is_dir());

    stepwise(root)
        .arg("up")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to apply"));

    stepwise(root)
        .arg("log")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("0001_create_data")
                .and(predicate::str::contains("0002_create_logs")),
        );

    stepwise(root)
        .arg("down")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reverted 1 migration"));
    assert!(!root.join("logs").exists());
    assert!(root.join("data").is_dir());

    stepwise(root)
        .args(["down", "--all", "-y"])
        .assert()
        .success();
    assert!(!root.join("data").exists());

    let state = fs::read_to_string(root.join("stepwise.state.json")).unwrap();
    assert!(state.contains("\"applied\": []"));
}

#[cfg(unix)]
#[test]
fn test_failed_migration_exits_non_zero() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    stepwise(root).arg("init").assert().success();
    stepwise(root)
        .args(["new", "-m", "broken", "--up", "echo nope >&2; exit 2"])
        .assert()
        .success();

    stepwise(root)
        .arg("up")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("migration '0001_broken' failed while running up")
                .and(predicate::str::contains("nope")),
        );
}
