use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use schemars::{Schema, schema_for};
use stepwise_config::StepwiseConfig;
use stepwise_core::MigrationFile;
use stepwise_loader::Ledger;

#[derive(Debug, Parser)]
#[command(
    name = "stepwise-schema-gen",
    about = "Emit JSON Schemas for stepwise migration files, config and state."
)]
struct Args {
    /// Output directory for schema files.
    #[arg(short = 'o', long = "out", default_value = "schemas")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    run(args.out)
}

fn run(out: PathBuf) -> Result<()> {
    fs::create_dir_all(&out).with_context(|| format!("create dir {}", out.display()))?;

    let schemas: [(&str, Schema); 3] = [
        ("migration.schema.json", schema_for!(MigrationFile)),
        ("config.schema.json", schema_for!(StepwiseConfig)),
        ("state.schema.json", schema_for!(Ledger)),
    ];

    println!("Wrote schemas:");
    for (file_name, schema) in &schemas {
        let path = out.join(file_name);
        write_schema(&path, schema)?;
        println!("  {}", path.display());
    }
    Ok(())
}

fn write_schema(path: &Path, schema: &Schema) -> Result<()> {
    let mut text = serde_json::to_string_pretty(schema)
        .with_context(|| format!("serialize {}", path.display()))?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn run_creates_output_directory_if_not_exists() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested").join("schemas");

        assert!(!out.exists());
        run(out.clone()).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn run_generates_migration_schema_file() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();

        run(out.to_path_buf()).unwrap();

        let schema = read_json(&out.join("migration.schema.json"));
        assert_eq!(schema["title"], "MigrationFile");
        let properties = schema["properties"].as_object().unwrap();
        for key in ["version", "comment", "createdAt", "up", "down"] {
            assert!(properties.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn run_generates_config_schema_file() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();

        run(out.to_path_buf()).unwrap();

        let content = fs::read_to_string(out.join("config.schema.json")).unwrap();
        assert!(content.contains("StepwiseConfig"));
        assert!(content.contains("migrationsDir"));
        assert!(content.contains("stateFile"));
    }

    #[test]
    fn run_generates_state_schema_file() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();

        run(out.to_path_buf()).unwrap();

        let content = fs::read_to_string(out.join("state.schema.json")).unwrap();
        assert!(content.contains("Ledger"));
        assert!(content.contains("AppliedEntry"));
        assert!(content.contains("appliedAt"));
    }

    #[test]
    fn run_overwrites_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        fs::write(out.join("state.schema.json"), "stale").unwrap();

        run(out.to_path_buf()).unwrap();

        read_json(&out.join("state.schema.json"));
    }
}
