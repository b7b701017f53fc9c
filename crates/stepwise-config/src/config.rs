use std::path::{Path, PathBuf};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::file_format::FileFormat;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "stepwise.json";

/// Default migration filename pattern: zero-padded version + sanitized comment.
pub fn default_migration_filename_pattern() -> String {
    "%04v_%m".to_string()
}

pub fn default_state_file() -> PathBuf {
    PathBuf::from("stepwise.state.json")
}

pub fn default_shell() -> String {
    "sh".to_string()
}

fn default_migrations_dir() -> PathBuf {
    PathBuf::from("migrations")
}

/// Top-level stepwise configuration (`stepwise.json`).
///
/// Relative paths are resolved against the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct StepwiseConfig {
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: PathBuf,
    /// JSON file recording which migrations have been applied.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    #[serde(default)]
    pub migration_format: FileFormat,
    #[serde(default = "default_migration_filename_pattern")]
    pub migration_filename_pattern: String,
    /// Program that runs migration commands as `<shell> -c <command>`.
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for StepwiseConfig {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            state_file: default_state_file(),
            migration_format: FileFormat::Json,
            migration_filename_pattern: default_migration_filename_pattern(),
            shell: default_shell(),
        }
    }
}

impl StepwiseConfig {
    /// Path where migration documents are stored.
    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// Path of the applied-migrations state file.
    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Preferred file format for new migrations.
    pub fn migration_format(&self) -> FileFormat {
        self.migration_format
    }

    /// Pattern for migration filenames (supports %v, %0Nv and %m placeholders).
    pub fn migration_filename_pattern(&self) -> &str {
        &self.migration_filename_pattern
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Migrations directory resolved against `root`.
    pub fn migrations_dir_in(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// State file resolved against `root`.
    pub fn state_file_in(&self, root: &Path) -> PathBuf {
        root.join(&self.state_file)
    }
}
