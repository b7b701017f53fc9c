use std::collections::HashMap;

use anyhow::Result;
use colored::Colorize;
use stepwise_loader::load_migrations;
use stepwise_runner::Migrator;

use crate::utils::open_migrator;

pub fn cmd_log() -> Result<()> {
    let mut migrator = open_migrator()?;
    let ledger = migrator.ledger()?;

    if ledger.applied.is_empty() {
        println!("{}", "No migrations have been applied.".bright_yellow());
        return Ok(());
    }

    // Comments come from the migration files; a missing file is not fatal here.
    let comments: HashMap<String, Option<String>> =
        load_migrations(migrator.root(), migrator.config())?
            .into_iter()
            .map(|m| (m.name, m.file.comment))
            .collect();

    println!(
        "{} {} {}",
        "Applied migrations".bright_cyan().bold(),
        "(oldest -> newest):".bright_white(),
        ledger.applied.len().to_string().bright_yellow().bold()
    );
    println!();

    for entry in &ledger.applied {
        println!(
            "{} {} {}",
            "Version:".bright_cyan().bold(),
            entry.version.to_string().bright_magenta().bold(),
            entry.name.bright_green()
        );
        println!(
            "  {} {}",
            "Applied at:".bright_cyan(),
            entry.applied_at.bright_white()
        );
        match comments.get(&entry.name) {
            Some(Some(comment)) => {
                println!("  {} {}", "Comment:".bright_cyan(), comment.bright_white())
            }
            Some(None) => {}
            None => println!("  {}", "(migration file is missing)".bright_red()),
        }
        println!();
    }

    // Surface any mismatch between the ledger and the files.
    if let Err(err) = migrator.load_completed() {
        tracing::warn!("{err:#}");
    }
    Ok(())
}
