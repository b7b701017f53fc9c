use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn schema_gen() -> Command {
    Command::new(cargo::cargo_bin!("stepwise-schema-gen"))
}

#[test]
fn test_main_with_long_output_flag() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("schemas");

    schema_gen()
        .arg("--out")
        .arg(out_dir.as_os_str())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote schemas:"));

    for file in ["migration.schema.json", "config.schema.json", "state.schema.json"] {
        assert!(out_dir.join(file).exists(), "missing {file}");
    }
}

#[test]
fn test_main_with_short_output_flag() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("custom_schemas");

    schema_gen()
        .arg("-o")
        .arg(out_dir.as_os_str())
        .assert()
        .success()
        .stdout(predicate::str::contains("state.schema.json"));

    assert!(out_dir.join("migration.schema.json").exists());
}

#[test]
fn test_main_with_default_output_dir() {
    let temp_dir = TempDir::new().unwrap();

    schema_gen().current_dir(temp_dir.path()).assert().success();

    let out_dir = temp_dir.path().join("schemas");
    assert!(out_dir.join("config.schema.json").exists());
}

#[test]
fn test_main_with_help_flag() {
    schema_gen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stepwise-schema-gen"));
}
