use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use stepwise_core::Direction;

use crate::migrations::ScriptMigration;

/// Runs the shell commands of a migration document.
///
/// Each command is passed to `<shell> -c` with the project root as working
/// directory. Commands run in order and the first non-zero exit stops the job.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    shell: String,
    workdir: PathBuf,
}

impl CommandRunner {
    pub fn new(shell: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
            workdir: workdir.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn run(&self, direction: Direction, migration: &ScriptMigration) -> Result<()> {
        let commands = migration.file.commands(direction);
        if commands.is_empty() {
            match direction {
                Direction::Up => bail!("migration '{}' has no up commands", migration.name),
                Direction::Down => bail!(
                    "migration '{}' has no down commands; it cannot be reverted",
                    migration.name
                ),
            }
        }

        for command in commands {
            tracing::debug!(migration = %migration.name, %direction, %command, "running command");
            let output = Command::new(&self.shell)
                .arg("-c")
                .arg(command)
                .current_dir(&self.workdir)
                .env("STEPWISE_MIGRATION", &migration.name)
                .env("STEPWISE_VERSION", migration.version().to_string())
                .env("STEPWISE_DIRECTION", direction.as_str())
                .output()
                .with_context(|| format!("spawn '{}' for command `{command}`", self.shell))?;

            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.trim().is_empty() {
                tracing::debug!(migration = %migration.name, "{}", stdout.trim_end());
            }

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                bail!(
                    "command `{command}` exited with {}: {}",
                    output.status,
                    stderr.trim()
                );
            }
        }
        Ok(())
    }
}
