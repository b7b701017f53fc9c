use std::num::NonZeroUsize;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stepwise_config::FileFormat;
use stepwise_core::Direction;
use stepwise_runner::Limit;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod progress;
mod utils;
use commands::{cmd_down, cmd_init, cmd_log, cmd_migrate, cmd_new, cmd_status, cmd_up};

/// stepwise command-line interface.
#[derive(Parser, Debug)]
#[command(name = "stepwise", author, version, about, arg_required_else_help = true)]
struct Cli {
    /// Log sequencer and command activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize stepwise.json with defaults.
    Init,
    /// Create a new migration file with the next version.
    New {
        #[arg(short = 'm', long = "message")]
        message: String,
        /// Command to run when applying. Repeat for several.
        #[arg(long = "up", value_name = "CMD")]
        up: Vec<String>,
        /// Command to run when reverting. Repeat for several.
        #[arg(long = "down", value_name = "CMD")]
        down: Vec<String>,
        /// Override the configured migration format.
        #[arg(short = 'f', long, value_enum)]
        format: Option<FileFormat>,
    },
    /// Apply pending migrations, oldest first.
    Up {
        /// Apply at most N migrations (default: all pending).
        #[arg(short = 'n', long = "count")]
        count: Option<NonZeroUsize>,
    },
    /// Revert applied migrations, newest first.
    Down {
        /// Revert at most N migrations (default: 1).
        #[arg(short = 'n', long = "count", conflicts_with = "all")]
        count: Option<NonZeroUsize>,
        /// Revert every applied migration.
        #[arg(long)]
        all: bool,
        /// Skip the confirmation prompt for --all.
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Run migrations in the given direction (`up` or `down`).
    Migrate {
        direction: Direction,
        /// Run at most N migrations (default: every eligible one).
        #[arg(short = 'n', long = "count")]
        count: Option<NonZeroUsize>,
        /// Skip the confirmation prompt when reverting everything.
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show configuration, applied and pending migrations.
    Status,
    /// Show applied migrations in the order they were applied.
    Log,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("STEPWISE_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init => cmd_init(),
        Commands::New {
            message,
            up,
            down,
            format,
        } => cmd_new(message, up, down, format),
        Commands::Up { count } => cmd_up(count),
        Commands::Down { count, all, yes } => cmd_down(count, all, yes),
        Commands::Migrate {
            direction,
            count,
            yes,
        } => cmd_migrate(direction, count.map_or(Limit::All, Limit::from), yes),
        Commands::Status => cmd_status(),
        Commands::Log => cmd_log(),
    }
}
