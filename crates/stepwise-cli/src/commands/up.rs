use std::num::NonZeroUsize;

use anyhow::Result;
use stepwise_core::Direction;
use stepwise_runner::Limit;

use crate::commands::cmd_migrate;

/// Apply `count` pending migrations, or all of them when omitted.
pub fn cmd_up(count: Option<NonZeroUsize>) -> Result<()> {
    cmd_migrate(Direction::Up, count.map_or(Limit::All, Limit::from), false)
}
