use anyhow::{Context, Result};
use dialoguer::Confirm;
use stepwise_core::Direction;
use stepwise_runner::{Limit, Sequencer};

use crate::progress::{finish, print_event};
use crate::utils::open_migrator;

/// Run up to `limit` migrations in `direction`.
///
/// Reverting every applied migration asks first unless `yes` is set.
pub fn cmd_migrate(direction: Direction, limit: Limit, yes: bool) -> Result<()> {
    let mut sequencer = Sequencer::new(open_migrator()?);

    if direction == Direction::Down && limit.is_all() && !yes {
        finish(sequencer.refresh())?;
        let applied = sequencer.state().completed().len();
        if applied > 0 && !confirm_revert_all(applied)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    sequencer.add_listener(print_event);
    finish(sequencer.migrate(direction, limit))
}

fn confirm_revert_all(applied: usize) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("Revert all {applied} applied migrations?"))
        .default(false)
        .interact()
        .context("read confirmation")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::{CwdGuard, write_config, write_migration};
    use rstest::rstest;
    use std::path::Path;
    use stepwise_config::StepwiseConfig;
    use stepwise_loader::Ledger;
    use tempfile::tempdir;

    fn applied() -> Vec<String> {
        Ledger::load(Path::new("stepwise.state.json"))
            .unwrap()
            .names()
            .map(str::to_string)
            .collect()
    }

    fn setup() {
        write_config(&StepwiseConfig::default());
        write_migration("0001_data", 1, &["mkdir data"], &["rmdir data"]);
        write_migration("0002_logs", 2, &["mkdir logs"], &["rmdir logs"]);
        write_migration("0003_tmp", 3, &["mkdir tmp"], &["rmdir tmp"]);
    }

    #[rstest]
    #[case::up_all("up", Limit::All, &["0001_data", "0002_logs", "0003_tmp"])]
    #[case::up_two("UP", Limit::from(2usize), &["0001_data", "0002_logs"])]
    #[case::down_one("down", Limit::from(1usize), &["0001_data", "0002_logs"])]
    #[case::down_all("Down", Limit::All, &[])]
    #[serial_test::serial]
    fn runs_parsed_direction(
        #[case] direction: &str,
        #[case] limit: Limit,
        #[case] expected: &[&str],
    ) {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        setup();
        let direction: Direction = direction.parse().unwrap();
        if direction == Direction::Down {
            cmd_migrate(Direction::Up, Limit::All, false).unwrap();
        }

        cmd_migrate(direction, limit, true).unwrap();

        assert_eq!(applied(), expected);
    }

    #[test]
    #[serial_test::serial]
    fn reverting_nothing_needs_no_prompt() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        setup();

        cmd_migrate(Direction::Down, Limit::All, false).unwrap();

        assert!(applied().is_empty());
    }
}
