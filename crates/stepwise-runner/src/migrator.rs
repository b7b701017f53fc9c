use std::cmp::Ordering;

use stepwise_core::{Direction, Migration};

use crate::BoxError;

/// Capabilities a [`Sequencer`](crate::Sequencer) needs from its environment.
///
/// Implementations decide where migrations come from, how their effect is
/// carried out, and where completion records live. The sequencer calls these
/// strictly one at a time and never caches their results across runs.
pub trait Migrator {
    type Migration: Migration + Clone;
    type Error: Into<BoxError>;

    /// Total order over migrations. Must be consistent across calls.
    fn compare(&self, a: &Self::Migration, b: &Self::Migration) -> Ordering {
        a.name().cmp(b.name())
    }

    /// Every migration currently known, in any order.
    fn load_all(&mut self) -> Result<Vec<Self::Migration>, Self::Error>;

    /// Migrations previously recorded as completed. Must be a subset of
    /// [`load_all`](Self::load_all) by name.
    fn load_completed(&mut self) -> Result<Vec<Self::Migration>, Self::Error>;

    /// Apply or revert the effect of one migration.
    fn execute(
        &mut self,
        direction: Direction,
        migration: &Self::Migration,
    ) -> Result<(), Self::Error>;

    /// Record a migration as completed. Called once per successful `up` job.
    fn save(&mut self, migration: &Self::Migration) -> Result<(), Self::Error>;

    /// Remove a completion record. Called once per successful `down` job.
    fn delete(&mut self, migration: &Self::Migration) -> Result<(), Self::Error>;
}
