use anyhow::Result;
use colored::Colorize;
use stepwise_loader::ScriptMigration;
use stepwise_runner::Sequencer;

use crate::progress::finish;
use crate::utils::open_migrator;

pub fn cmd_status() -> Result<()> {
    let mut sequencer = Sequencer::new(open_migrator()?);
    finish(sequencer.refresh())?;

    let config = sequencer.migrator().config();
    println!("{}", "Configuration:".bright_cyan().bold());
    println!(
        "  {} {}",
        "Migrations directory:".cyan(),
        format!("{}", config.migrations_dir().display()).bright_white()
    );
    println!(
        "  {} {}",
        "State file:".cyan(),
        format!("{}", config.state_file().display()).bright_white()
    );
    println!(
        "  {} {}",
        "Migration format:".cyan(),
        config.migration_format().extension()
    );
    println!(
        "  {} {}",
        "Migration filename pattern:".cyan(),
        config.migration_filename_pattern().bright_white()
    );
    println!("  {} {}", "Shell:".cyan(), config.shell().bright_white());
    println!();

    let state = sequencer.state();
    print_section("Applied migrations:", state.completed());
    print_section("Pending migrations:", state.pending());

    let pending = state.pending().len();
    if state.all().is_empty() {
        println!(
            "{} {}",
            "Status:".bright_cyan().bold(),
            "No migrations found.".bright_yellow()
        );
        println!(
            "  {} {} {}",
            "Run".bright_white(),
            "'stepwise new -m \"initial\"'".bright_cyan().bold(),
            "to create the first migration.".bright_white()
        );
    } else if pending == 0 {
        println!(
            "{} {}",
            "Status:".bright_cyan().bold(),
            "Up to date.".bright_green()
        );
    } else {
        println!(
            "{} {} {}",
            "Status:".bright_cyan().bold(),
            pending.to_string().bright_yellow(),
            "pending.".bright_yellow()
        );
        println!(
            "  {} {} {}",
            "Run".bright_white(),
            "'stepwise up'".bright_cyan().bold(),
            "to apply them.".bright_white()
        );
    }

    Ok(())
}

fn print_section(title: &str, migrations: &[ScriptMigration]) {
    println!(
        "{} {}",
        title.bright_cyan().bold(),
        migrations.len().to_string().bright_yellow()
    );
    for migration in migrations {
        print!(
            "  {} {} {}",
            "-".bright_white(),
            format!("v{}", migration.version()).bright_magenta(),
            migration.name.bright_green()
        );
        if !migration.file.is_reversible() {
            print!(" {}", "(irreversible)".bright_black());
        }
        println!();
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cmd_up;
    use crate::utils::testing::{CwdGuard, write_config, write_migration};
    use serial_test::serial;
    use std::num::NonZeroUsize;
    use stepwise_config::StepwiseConfig;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn status_requires_config() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());

        assert!(cmd_status().is_err());
    }

    #[test]
    #[serial]
    fn status_without_migrations() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(&StepwiseConfig::default());

        cmd_status().unwrap();
    }

    #[test]
    #[serial]
    fn status_with_applied_and_pending() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(&StepwiseConfig::default());
        write_migration("0001_data", 1, &["mkdir data"], &["rmdir data"]);
        write_migration("0002_once", 2, &["true"], &[]);
        cmd_up(NonZeroUsize::new(1)).unwrap();

        cmd_status().unwrap();
    }

    #[test]
    #[serial]
    fn status_fails_on_corrupt_state_file() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());
        write_config(&StepwiseConfig::default());
        write_migration("0001_data", 1, &["true"], &[]);
        std::fs::write("stepwise.state.json", "nope").unwrap();

        let err = cmd_status().unwrap_err();
        assert_eq!(err.to_string(), "failed to load completed migrations");
    }
}
