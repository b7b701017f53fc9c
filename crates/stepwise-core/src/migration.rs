#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Direction;

/// A unit the sequencer can order, run, and record.
///
/// The sequencer never looks inside a migration. Two migrations are the same
/// migration when their names are equal, regardless of any other content.
pub trait Migration {
    fn name(&self) -> &str;
}

impl Migration for String {
    fn name(&self) -> &str {
        self
    }
}

/// On-disk migration document (JSON or YAML).
///
/// Each entry in `up`/`down` is a command handed to the configured shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct MigrationFile {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub up: Vec<String>,
    #[serde(default)]
    pub down: Vec<String>,
}

impl MigrationFile {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    /// Commands to run for the given direction.
    pub fn commands(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }

    /// Whether the migration can be reverted.
    pub fn is_reversible(&self) -> bool {
        !self.down.is_empty()
    }
}
