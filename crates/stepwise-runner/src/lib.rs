//! Directional migration sequencing.
//!
//! A [`Sequencer`] owns a [`Migrator`] (the six capabilities: compare, load
//! all, load completed, execute, save, delete) and moves migrations between
//! the completed and pending sets one job at a time. Progress is reported to
//! registered [`Listener`]s as [`SequencerEvent`]s.

pub mod error;
pub mod event;
pub mod migrator;
pub mod sequencer;
pub mod shared;
pub mod state;

pub use error::{BoxError, LoadTarget, SequencerError};
pub use event::{Listener, SequencerEvent};
pub use migrator::Migrator;
pub use sequencer::{Phase, Sequencer};
pub use shared::SharedSequencer;
pub use state::MigrationState;
pub use stepwise_core::{Direction, Limit, Migration, PersistAction};
