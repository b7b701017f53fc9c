use std::panic::{AssertUnwindSafe, catch_unwind};

use stepwise_core::{Direction, PersistAction};

use crate::Phase;

/// Lifecycle notifications emitted by a [`Sequencer`](crate::Sequencer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    /// Both loading capabilities returned and the collections were rebuilt.
    Loaded {
        all: usize,
        completed: usize,
        pending: usize,
    },
    /// The job queue for this run, in execution order.
    Queued {
        direction: Direction,
        jobs: Vec<String>,
    },
    Executing {
        direction: Direction,
        migration: String,
    },
    Executed {
        direction: Direction,
        migration: String,
    },
    /// The completion record was updated and the job is done.
    Persisted {
        direction: Direction,
        migration: String,
        action: PersistAction,
    },
    Failed {
        phase: Phase,
        migration: Option<String>,
        message: String,
    },
    /// The queue drained. `migrated` counts the jobs of this run.
    Finished {
        direction: Direction,
        migrated: usize,
    },
}

/// Receives [`SequencerEvent`]s.
///
/// Listeners observe a run; they cannot influence it. A panicking listener is
/// logged and skipped.
pub trait Listener: Send {
    fn on_event(&self, event: &SequencerEvent);
}

impl<F> Listener for F
where
    F: Fn(&SequencerEvent) + Send,
{
    fn on_event(&self, event: &SequencerEvent) {
        self(event)
    }
}

#[derive(Default)]
pub(crate) struct Listeners {
    inner: Vec<Box<dyn Listener>>,
}

impl Listeners {
    pub(crate) fn push(&mut self, listener: Box<dyn Listener>) {
        self.inner.push(listener);
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }

    pub(crate) fn emit(&self, event: &SequencerEvent) {
        for listener in &self.inner {
            if catch_unwind(AssertUnwindSafe(|| listener.on_event(event))).is_err() {
                tracing::warn!(?event, "listener panicked; event dropped for this listener");
            }
        }
    }
}
