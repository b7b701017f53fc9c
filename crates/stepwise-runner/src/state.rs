use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};

use stepwise_core::{Direction, Limit, Migration};

use crate::SequencerError;

/// The four collections a run works on.
///
/// `completed` and `pending` always partition `all` by name, each sorted by
/// the migrator's order. `queue` is rebuilt for every run and drained from
/// the front as jobs are taken.
#[derive(Debug, Clone)]
pub struct MigrationState<M> {
    all: Vec<M>,
    completed: Vec<M>,
    pending: Vec<M>,
    queue: VecDeque<M>,
}

impl<M> Default for MigrationState<M> {
    fn default() -> Self {
        Self {
            all: Vec::new(),
            completed: Vec::new(),
            pending: Vec::new(),
            queue: VecDeque::new(),
        }
    }
}

impl<M: Migration + Clone> MigrationState<M> {
    /// Build a state from freshly loaded migrations.
    ///
    /// `pending` is `all` minus `completed` by name. Both `completed` and
    /// `pending` are sorted with `compare`; `all` keeps load order.
    pub fn reconcile<F>(
        all: Vec<M>,
        mut completed: Vec<M>,
        mut compare: F,
    ) -> Result<Self, SequencerError>
    where
        F: FnMut(&M, &M) -> Ordering,
    {
        let mut pending: Vec<M> = {
            let mut known = HashSet::with_capacity(all.len());
            for migration in &all {
                if !known.insert(migration.name()) {
                    return Err(SequencerError::DuplicateMigration(migration.name().to_string()));
                }
            }

            let mut done = HashSet::with_capacity(completed.len());
            for migration in &completed {
                if !known.contains(migration.name()) {
                    return Err(SequencerError::UnknownCompleted(migration.name().to_string()));
                }
                if !done.insert(migration.name()) {
                    return Err(SequencerError::DuplicateMigration(migration.name().to_string()));
                }
            }

            all.iter()
                .filter(|m| !done.contains(m.name()))
                .cloned()
                .collect()
        };
        pending.sort_by(&mut compare);
        completed.sort_by(&mut compare);

        Ok(Self {
            all,
            completed,
            pending,
            queue: VecDeque::new(),
        })
    }

    /// Replace the queue with at most `limit` jobs for `direction`.
    ///
    /// `Up` takes the oldest pending migrations; `Down` takes the most
    /// recently completed ones, newest first. Returns the queue length.
    pub fn enqueue(&mut self, direction: Direction, limit: Limit) -> usize {
        self.queue = match direction {
            Direction::Up => {
                let n = limit.take(self.pending.len());
                self.pending.iter().take(n).cloned().collect()
            }
            Direction::Down => {
                let n = limit.take(self.completed.len());
                self.completed.iter().rev().take(n).cloned().collect()
            }
        };
        self.queue.len()
    }

    /// Take the next job off the front of the queue.
    pub(crate) fn next_job(&mut self) -> Option<M> {
        self.queue.pop_front()
    }

    /// Move a successfully persisted job between `pending` and `completed`.
    pub(crate) fn shift(&mut self, direction: Direction, job: &M) {
        match direction {
            Direction::Up => {
                if self.pending.is_empty() {
                    return;
                }
                let migration = self.pending.remove(0);
                debug_assert_eq!(migration.name(), job.name());
                self.completed.push(migration);
            }
            Direction::Down => {
                if let Some(migration) = self.completed.pop() {
                    debug_assert_eq!(migration.name(), job.name());
                    self.pending.insert(0, migration);
                }
            }
        }
    }
}

impl<M> MigrationState<M> {
    /// Every known migration, in load order.
    pub fn all(&self) -> &[M] {
        &self.all
    }

    /// Completed migrations, oldest first.
    pub fn completed(&self) -> &[M] {
        &self.completed
    }

    /// Pending migrations, oldest first.
    pub fn pending(&self) -> &[M] {
        &self.pending
    }

    /// Jobs not yet taken in the current run.
    pub fn queue(&self) -> &VecDeque<M> {
        &self.queue
    }
}
