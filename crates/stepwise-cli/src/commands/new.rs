use std::fs;

use anyhow::{Context, Result, bail};
use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use stepwise_config::FileFormat;
use stepwise_core::MigrationFile;
use stepwise_loader::load_migrations;

use crate::utils::{load_config, migration_filename, project_root};

pub fn cmd_new(
    message: String,
    up: Vec<String>,
    down: Vec<String>,
    format: Option<FileFormat>,
) -> Result<()> {
    let config = load_config()?;
    let root = project_root()?;
    let existing = load_migrations(&root, &config)?;

    let version = existing
        .iter()
        .map(|m| m.version())
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .context("migration version overflow")?;

    let file = MigrationFile {
        comment: Some(message),
        created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        up,
        down,
        ..MigrationFile::new(version)
    };

    let migrations_dir = config.migrations_dir_in(&root);
    fs::create_dir_all(&migrations_dir).context("create migrations directory")?;

    let format = format.unwrap_or(config.migration_format());
    let filename = migration_filename(
        version,
        file.comment.as_deref(),
        format,
        config.migration_filename_pattern(),
    );
    let path = migrations_dir.join(&filename);
    if path.exists() {
        bail!("migration file already exists: {}", path.display());
    }

    let text = if format.is_yaml() {
        serde_yaml::to_string(&file).context("serialize migration")?
    } else {
        let mut text = serde_json::to_string_pretty(&file).context("serialize migration")?;
        text.push('\n');
        text
    };
    fs::write(&path, text).with_context(|| format!("write migration file: {}", path.display()))?;

    println!("Created migration: {}", path.display());
    println!("  Version: {}", version);
    println!("  Up commands: {}", file.up.len());
    println!("  Down commands: {}", file.down.len());
    if !file.is_reversible() {
        println!(
            "  {}",
            "No down commands: this migration cannot be reverted.".bright_yellow()
        );
    }
    Ok(())
}
