use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use stepwise_config::{FileFormat, StepwiseConfig};
use stepwise_core::{Migration, MigrationFile};

/// A migration document together with where it was loaded from.
///
/// Its identity is the file stem, e.g. `0003_add_cache_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptMigration {
    pub name: String,
    pub path: PathBuf,
    pub file: MigrationFile,
}

impl ScriptMigration {
    pub fn version(&self) -> u32 {
        self.file.version
    }
}

impl Migration for ScriptMigration {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Read one migration document, choosing the parser by extension.
pub fn load_migration_file(path: &Path) -> Result<MigrationFile> {
    let format = path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(FileFormat::from_extension)
        .with_context(|| format!("unsupported migration file: {}", path.display()))?;

    let content = fs::read_to_string(path)
        .with_context(|| format!("read migration file: {}", path.display()))?;

    if format.is_yaml() {
        serde_yaml::from_str(&content)
            .with_context(|| format!("parse migration: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("parse migration: {}", path.display()))
    }
}

/// Load every migration under the configured directory, sorted by version.
///
/// A missing directory yields no migrations. Two files may not share a version.
pub fn load_migrations(root: &Path, config: &StepwiseConfig) -> Result<Vec<ScriptMigration>> {
    let migrations_dir = config.migrations_dir_in(root);
    if !migrations_dir.exists() {
        return Ok(Vec::new());
    }

    let mut migrations = Vec::new();
    let entries = fs::read_dir(&migrations_dir)
        .with_context(|| format!("read migrations directory: {}", migrations_dir.display()))?;

    for entry in entries {
        let path = entry.context("read directory entry")?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path.extension().and_then(|s| s.to_str());
        if ext.and_then(FileFormat::from_extension).is_none() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let name = stem.to_string();

        let file = load_migration_file(&path)?;
        migrations.push(ScriptMigration { name, path, file });
    }

    migrations.sort_by(|a, b| (a.version(), &a.name).cmp(&(b.version(), &b.name)));

    let mut seen: HashMap<u32, &str> = HashMap::new();
    for migration in &migrations {
        if let Some(other) = seen.insert(migration.version(), &migration.name) {
            bail!(
                "duplicate migration version {}: '{}' and '{}'",
                migration.version(),
                other,
                migration.name
            );
        }
    }

    tracing::debug!(dir = %migrations_dir.display(), count = migrations.len(), "loaded migrations");
    Ok(migrations)
}
