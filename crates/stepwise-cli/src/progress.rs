use anyhow::Result;
use colored::Colorize;
use stepwise_core::{Direction, PersistAction};
use stepwise_runner::{SequencerError, SequencerEvent};

/// Listener that prints run progress to stdout.
pub fn print_event(event: &SequencerEvent) {
    match event {
        SequencerEvent::Queued { direction, jobs } if jobs.is_empty() => {
            let msg = match direction {
                Direction::Up => "Nothing to apply. All migrations are up to date.",
                Direction::Down => "Nothing to revert. No migrations have been applied.",
            };
            println!("{}", msg.bright_yellow());
        }
        SequencerEvent::Queued { direction, jobs } => {
            println!(
                "{} {} {}",
                verb(*direction).bright_cyan().bold(),
                jobs.len().to_string().bright_yellow(),
                plural(jobs.len()).bright_cyan().bold()
            );
        }
        SequencerEvent::Persisted {
            migration, action, ..
        } => {
            let mark = match action {
                PersistAction::Save => "+".bright_green(),
                PersistAction::Delete => "-".bright_red(),
            };
            println!("  {} {}", mark, migration.bright_white());
        }
        SequencerEvent::Failed {
            migration: Some(name),
            ..
        } => {
            println!("  {} {}", "x".red().bold(), name.bright_white());
        }
        SequencerEvent::Finished {
            direction,
            migrated,
        } if *migrated > 0 => {
            let done = match direction {
                Direction::Up => "Applied",
                Direction::Down => "Reverted",
            };
            println!(
                "{} {} {}",
                done.bright_green().bold(),
                migrated.to_string().bright_yellow(),
                plural(*migrated)
            );
        }
        _ => {}
    }
}

/// Turn a run result into the command result, printing an operator hint
/// when the target and the state file disagree.
pub fn finish(result: Result<(), SequencerError>) -> Result<()> {
    match &result {
        Err(err) if err.is_inconsistent() => {
            let name = err.migration().unwrap_or_default();
            eprintln!(
                "{} '{}' {}",
                "warning: migration".yellow().bold(),
                name,
                "changed the project but the state file was not updated.".yellow()
            );
            eprintln!(
                "  {}",
                "Fix the state file by hand before running stepwise again.".bright_white()
            );
        }
        _ => {}
    }
    result.map_err(anyhow::Error::from)
}

fn verb(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "Applying",
        Direction::Down => "Reverting",
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "migration" } else { "migrations" }
}
