use std::sync::Arc;

use parking_lot::Mutex;
use stepwise_core::{Direction, Limit};

use crate::{Migrator, Sequencer, SequencerError};

/// A [`Sequencer`] that can be handed to several threads.
///
/// Runs never overlap: [`migrate`](Self::migrate) waits for a run in progress
/// to finish before starting, and [`try_migrate`](Self::try_migrate) fails
/// with [`SequencerError::Busy`] instead of waiting.
pub struct SharedSequencer<R: Migrator> {
    inner: Arc<Mutex<Sequencer<R>>>,
}

impl<R: Migrator> Clone for SharedSequencer<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Migrator> From<Sequencer<R>> for SharedSequencer<R> {
    fn from(sequencer: Sequencer<R>) -> Self {
        Self::new(sequencer)
    }
}

impl<R: Migrator> SharedSequencer<R> {
    pub fn new(sequencer: Sequencer<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sequencer)),
        }
    }

    /// Run after any run already in progress has finished.
    pub fn migrate(
        &self,
        direction: Direction,
        limit: impl Into<Limit>,
    ) -> Result<(), SequencerError> {
        self.inner.lock().migrate(direction, limit)
    }

    /// Run now, or fail with [`SequencerError::Busy`] if another run holds
    /// the sequencer.
    pub fn try_migrate(
        &self,
        direction: Direction,
        limit: impl Into<Limit>,
    ) -> Result<(), SequencerError> {
        match self.inner.try_lock() {
            Some(mut sequencer) => sequencer.migrate(direction, limit),
            None => {
                tracing::debug!(%direction, "rejected overlapping migration run");
                Err(SequencerError::Busy)
            }
        }
    }

    pub fn up(&self, limit: impl Into<Limit>) -> Result<(), SequencerError> {
        self.migrate(Direction::Up, limit)
    }

    pub fn down(&self, limit: impl Into<Limit>) -> Result<(), SequencerError> {
        self.migrate(Direction::Down, limit)
    }

    /// Inspect the sequencer between runs.
    pub fn with<T>(&self, f: impl FnOnce(&Sequencer<R>) -> T) -> T {
        f(&self.inner.lock())
    }
}
