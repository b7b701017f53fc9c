use std::num::NonZeroUsize;

use anyhow::Result;
use stepwise_core::Direction;
use stepwise_runner::Limit;

use crate::commands::cmd_migrate;

/// Revert `count` migrations (one when omitted), or all of them with `all`.
pub fn cmd_down(count: Option<NonZeroUsize>, all: bool, yes: bool) -> Result<()> {
    let limit = if all {
        Limit::All
    } else {
        count.map_or(Limit::from(1usize), Limit::from)
    };
    cmd_migrate(Direction::Down, limit, yes)
}
