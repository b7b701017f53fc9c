use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use chrono::{SecondsFormat, Utc};
use stepwise_config::StepwiseConfig;
use stepwise_core::Direction;
use stepwise_runner::Migrator;

use crate::command::CommandRunner;
use crate::config::load_config_or_default;
use crate::ledger::{AppliedEntry, Ledger};
use crate::migrations::{ScriptMigration, load_migrations};

/// Migrator backed by a project directory.
///
/// Migrations are the documents in the configured migrations directory,
/// completion records live in the state file, and executing a migration runs
/// its shell commands from the project root.
#[derive(Debug, Clone)]
pub struct FsMigrator {
    root: PathBuf,
    config: StepwiseConfig,
    runner: CommandRunner,
}

impl FsMigrator {
    pub fn new(root: impl Into<PathBuf>, config: StepwiseConfig) -> Self {
        let root = root.into();
        let runner = CommandRunner::new(config.shell(), root.clone());
        Self {
            root,
            config,
            runner,
        }
    }

    /// Open the project at `root`, reading `stepwise.json` if present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = load_config_or_default(Some(root.clone()))?;
        Ok(Self::new(root, config))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StepwiseConfig {
        &self.config
    }

    pub fn state_file(&self) -> PathBuf {
        self.config.state_file_in(&self.root)
    }

    /// Current contents of the state file.
    pub fn ledger(&self) -> Result<Ledger> {
        Ledger::load(&self.state_file())
    }
}

impl Migrator for FsMigrator {
    type Migration = ScriptMigration;
    type Error = anyhow::Error;

    fn compare(&self, a: &ScriptMigration, b: &ScriptMigration) -> Ordering {
        a.version()
            .cmp(&b.version())
            .then_with(|| a.name.cmp(&b.name))
    }

    fn load_all(&mut self) -> Result<Vec<ScriptMigration>> {
        load_migrations(&self.root, &self.config)
    }

    fn load_completed(&mut self) -> Result<Vec<ScriptMigration>> {
        let ledger = self.ledger()?;
        if ledger.applied.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::with_capacity(ledger.applied.len());
        for entry in &ledger.applied {
            if !seen.insert(entry.name.as_str()) {
                bail!("migration '{}' is recorded as applied more than once", entry.name);
            }
        }

        let known = load_migrations(&self.root, &self.config)?;
        let mut by_name: HashMap<String, ScriptMigration> =
            known.into_iter().map(|m| (m.name.clone(), m)).collect();

        let mut completed = Vec::with_capacity(ledger.applied.len());
        for entry in &ledger.applied {
            let Some(migration) = by_name.remove(&entry.name) else {
                bail!(
                    "applied migration '{}' has no file in {}",
                    entry.name,
                    self.config.migrations_dir_in(&self.root).display()
                );
            };
            completed.push(migration);
        }
        Ok(completed)
    }

    fn execute(&mut self, direction: Direction, migration: &ScriptMigration) -> Result<()> {
        self.runner.run(direction, migration)
    }

    fn save(&mut self, migration: &ScriptMigration) -> Result<()> {
        let path = self.state_file();
        let mut ledger = Ledger::load(&path)?;
        ledger.record(AppliedEntry {
            name: migration.name.clone(),
            version: migration.version(),
            applied_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })?;
        ledger.store(&path)
    }

    fn delete(&mut self, migration: &ScriptMigration) -> Result<()> {
        let path = self.state_file();
        let mut ledger = Ledger::load(&path)?;
        ledger.forget(&migration.name)?;
        ledger.store(&path)
    }
}
