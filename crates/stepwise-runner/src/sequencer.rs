use std::fmt;

use stepwise_core::{Direction, Limit, Migration, PersistAction};

use crate::error::LoadTarget;
use crate::event::{Listener, Listeners, SequencerEvent};
use crate::{MigrationState, Migrator, SequencerError};

/// Where a sequencer is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Loading,
    Reconciling,
    Executing,
    Persisting,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Reconciling => "reconciling",
            Phase::Executing => "executing",
            Phase::Persisting => "persisting",
            Phase::Done => "done",
            Phase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Drives migrations in one direction, one job at a time.
///
/// Every run reloads the known and completed migrations from the
/// [`Migrator`], rebuilds the pending set, queues at most `limit` jobs, and
/// executes them in order. A job only counts as done after its completion
/// record was saved (`up`) or deleted (`down`); the first failure ends the run
/// and leaves `completed`/`pending` exactly as they were before that job.
pub struct Sequencer<R: Migrator> {
    migrator: R,
    state: MigrationState<R::Migration>,
    phase: Phase,
    listeners: Listeners,
}

impl<R: Migrator> Sequencer<R> {
    pub fn new(migrator: R) -> Self {
        Self {
            migrator,
            state: MigrationState::default(),
            phase: Phase::Idle,
            listeners: Listeners::default(),
        }
    }

    pub fn with_listener(mut self, listener: impl Listener + 'static) -> Self {
        self.add_listener(listener);
        self
    }

    pub fn add_listener(&mut self, listener: impl Listener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Apply pending migrations, oldest first.
    pub fn up(&mut self, limit: impl Into<Limit>) -> Result<(), SequencerError> {
        self.migrate(Direction::Up, limit)
    }

    /// Revert completed migrations, newest first.
    pub fn down(&mut self, limit: impl Into<Limit>) -> Result<(), SequencerError> {
        self.migrate(Direction::Down, limit)
    }

    /// Load, reconcile, and run at most `limit` jobs in `direction`.
    ///
    /// Succeeds when the queue drains, including when it starts out empty.
    pub fn migrate(
        &mut self,
        direction: Direction,
        limit: impl Into<Limit>,
    ) -> Result<(), SequencerError> {
        let limit = limit.into();
        tracing::debug!(%direction, %limit, "starting migration run");

        self.refresh()?;

        let queued = self.state.enqueue(direction, limit);
        tracing::debug!(%direction, queued, "job queue built");
        let jobs = self
            .state
            .queue()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        self.emit(SequencerEvent::Queued { direction, jobs });

        self.drain(direction)
    }

    /// Reload both migration sets and rebuild the pending list.
    ///
    /// Nothing is executed. On failure the previous state is kept.
    pub fn refresh(&mut self) -> Result<(), SequencerError> {
        self.phase = Phase::Loading;
        let all = match self.migrator.load_all() {
            Ok(all) => all,
            Err(source) => {
                return Err(self.fail(SequencerError::Load {
                    target: LoadTarget::All,
                    source: source.into(),
                }));
            }
        };
        let completed = match self.migrator.load_completed() {
            Ok(completed) => completed,
            Err(source) => {
                return Err(self.fail(SequencerError::Load {
                    target: LoadTarget::Completed,
                    source: source.into(),
                }));
            }
        };

        self.phase = Phase::Reconciling;
        let migrator = &self.migrator;
        let state = MigrationState::reconcile(all, completed, |a, b| migrator.compare(a, b));
        match state {
            Ok(state) => self.state = state,
            Err(err) => return Err(self.fail(err)),
        }

        tracing::debug!(
            all = self.state.all().len(),
            completed = self.state.completed().len(),
            pending = self.state.pending().len(),
            "migrations reconciled"
        );
        self.emit(SequencerEvent::Loaded {
            all: self.state.all().len(),
            completed: self.state.completed().len(),
            pending: self.state.pending().len(),
        });
        self.phase = Phase::Idle;
        Ok(())
    }

    fn drain(&mut self, direction: Direction) -> Result<(), SequencerError> {
        let mut migrated = 0;

        while let Some(job) = self.state.next_job() {
            let name = job.name().to_string();

            self.phase = Phase::Executing;
            self.emit(SequencerEvent::Executing {
                direction,
                migration: name.clone(),
            });
            if let Err(source) = self.migrator.execute(direction, &job) {
                return Err(self.fail(SequencerError::Execution {
                    name,
                    direction,
                    source: source.into(),
                }));
            }
            tracing::info!(migration = %name, %direction, "completed migration");
            self.emit(SequencerEvent::Executed {
                direction,
                migration: name.clone(),
            });

            self.phase = Phase::Persisting;
            let action = direction.persist_action();
            let persisted = match action {
                PersistAction::Save => self.migrator.save(&job),
                PersistAction::Delete => self.migrator.delete(&job),
            };
            if let Err(source) = persisted {
                return Err(self.fail(SequencerError::Persist {
                    name,
                    direction,
                    action,
                    source: source.into(),
                }));
            }

            self.state.shift(direction, &job);
            migrated += 1;
            tracing::info!(migration = %name, %action, "recorded migration");
            self.emit(SequencerEvent::Persisted {
                direction,
                migration: name,
                action,
            });
        }

        self.phase = Phase::Done;
        tracing::debug!(%direction, migrated, "migration run finished");
        self.emit(SequencerEvent::Finished {
            direction,
            migrated,
        });
        Ok(())
    }

    fn fail(&mut self, err: SequencerError) -> SequencerError {
        self.phase = Phase::Failed;
        tracing::warn!(
            phase = %err.phase(),
            migration = ?err.migration(),
            error = %err,
            "migration run failed"
        );
        self.emit(SequencerEvent::Failed {
            phase: err.phase(),
            migration: err.migration().map(str::to_string),
            message: err.to_string(),
        });
        err
    }

    fn emit(&self, event: SequencerEvent) {
        self.listeners.emit(&event);
    }

    pub fn state(&self) -> &MigrationState<R::Migration> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn migrator(&self) -> &R {
        &self.migrator
    }

    pub fn migrator_mut(&mut self) -> &mut R {
        &mut self.migrator
    }
}

impl<R> fmt::Debug for Sequencer<R>
where
    R: Migrator + fmt::Debug,
    R::Migration: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequencer")
            .field("migrator", &self.migrator)
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
