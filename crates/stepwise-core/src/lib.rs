pub mod direction;
pub mod limit;
pub mod migration;

pub use direction::{Direction, ParseDirectionError, PersistAction};
pub use limit::Limit;
pub use migration::{Migration, MigrationFile};
