use std::fmt;
use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which way a run moves the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply pending migrations, oldest first.
    Up,
    /// Revert completed migrations, newest first.
    Down,
}

impl Direction {
    /// The bookkeeping step that follows a successful job in this direction.
    pub fn persist_action(self) -> PersistAction {
        match self {
            Direction::Up => PersistAction::Save,
            Direction::Down => PersistAction::Delete,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown migration direction '{0}': expected 'up' or 'down'")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// How a completed job is recorded: `save` after applying, `delete` after reverting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistAction {
    Save,
    Delete,
}

impl fmt::Display for PersistAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistAction::Save => f.write_str("save"),
            PersistAction::Delete => f.write_str("delete"),
        }
    }
}
