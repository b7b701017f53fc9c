pub mod command;
pub mod config;
pub mod fs_migrator;
pub mod ledger;
pub mod migrations;

pub use command::CommandRunner;
pub use config::{load_config, load_config_from_path, load_config_or_default};
pub use fs_migrator::FsMigrator;
pub use ledger::{AppliedEntry, Ledger};
pub use migrations::{ScriptMigration, load_migration_file, load_migrations};
