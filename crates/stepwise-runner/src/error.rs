use std::fmt;

use stepwise_core::{Direction, PersistAction};
use thiserror::Error;

use crate::Phase;

/// Error type the capabilities hand back to the sequencer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which of the two loading capabilities failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTarget {
    All,
    Completed,
}

impl fmt::Display for LoadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadTarget::All => f.write_str("known"),
            LoadTarget::Completed => f.write_str("completed"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SequencerError {
    #[error("failed to load {target} migrations")]
    Load {
        target: LoadTarget,
        #[source]
        source: BoxError,
    },
    #[error("migration '{0}' is listed more than once")]
    DuplicateMigration(String),
    #[error("completed migration '{0}' is not among the known migrations")]
    UnknownCompleted(String),
    #[error("migration '{name}' failed while running {direction}")]
    Execution {
        name: String,
        direction: Direction,
        #[source]
        source: BoxError,
    },
    #[error("migration '{name}' ran {direction} but its completion record could not be {action}d")]
    Persist {
        name: String,
        direction: Direction,
        action: PersistAction,
        #[source]
        source: BoxError,
    },
    #[error("another migration run is already in progress")]
    Busy,
}

impl SequencerError {
    /// Phase the run was in when the error surfaced.
    pub fn phase(&self) -> Phase {
        match self {
            SequencerError::Load { .. } => Phase::Loading,
            SequencerError::DuplicateMigration(_) | SequencerError::UnknownCompleted(_) => {
                Phase::Reconciling
            }
            SequencerError::Execution { .. } => Phase::Executing,
            SequencerError::Persist { .. } => Phase::Persisting,
            SequencerError::Busy => Phase::Idle,
        }
    }

    /// Name of the migration the error is about, if any.
    pub fn migration(&self) -> Option<&str> {
        match self {
            SequencerError::DuplicateMigration(name)
            | SequencerError::UnknownCompleted(name)
            | SequencerError::Execution { name, .. }
            | SequencerError::Persist { name, .. } => Some(name),
            SequencerError::Load { .. } | SequencerError::Busy => None,
        }
    }

    /// True when the target was changed but the completion record was not.
    /// An operator has to reconcile the record before the next run.
    pub fn is_inconsistent(&self) -> bool {
        matches!(self, SequencerError::Persist { .. })
    }
}
