//! Run ordered migrations forward and backward.
//!
//! A [`Sequencer`] loads the known and completed migrations from a
//! [`Migrator`], works out what is pending, and then applies or reverts them
//! one job at a time. A failing job stops the run.
//!
//! ```ignore
//! use stepwise::{FsMigrator, Sequencer};
//!
//! let migrator = FsMigrator::open(".")?;
//! let mut sequencer = Sequencer::new(migrator)
//!     .with_listener(|event: &stepwise::SequencerEvent| println!("{event:?}"));
//! sequencer.up(stepwise::Limit::All)?;
//! sequencer.down(1usize)?;
//! ```

pub use stepwise_core::{
    Direction, Limit, Migration, MigrationFile, ParseDirectionError, PersistAction,
};
pub use stepwise_runner::{
    BoxError, Listener, LoadTarget, MigrationState, Migrator, Phase, Sequencer, SequencerError,
    SequencerEvent, SharedSequencer,
};

#[cfg(feature = "fs")]
pub use stepwise_loader::{FsMigrator, Ledger, ScriptMigration};
