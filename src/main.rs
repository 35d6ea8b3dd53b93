//! Enigma CLI - drive the bot from recorded server events or snapshots.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use enigma::BotKind;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Enigma - a heuristic bot for grid territory-conquest games
#[derive(Parser, Debug)]
#[command(name = "enigma")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log planning decisions (same as RUST_LOG=enigma=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Bot selection shared by every command.
#[derive(clap::Args, Debug)]
struct BotArgs {
    /// Bot config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strategy, overriding the config file
    #[arg(short, long)]
    kind: Option<BotKind>,

    /// Seed for random target choice, overriding the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: cli::OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play through a JSON-lines stream of server events
    Run {
        /// Event file, one JSON event per line (default: stdin)
        events: Option<PathBuf>,

        #[command(flatten)]
        bot: BotArgs,
    },

    /// Plan a single turn from a JSON snapshot
    Plan {
        /// Snapshot file (default: stdin)
        snapshot: Option<PathBuf>,

        #[command(flatten)]
        bot: BotArgs,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("enigma=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("enigma=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Run { events, bot } => cli::load_config(bot.config.as_deref(), bot.kind, bot.seed)
            .and_then(|config| cli::run::execute(events.as_deref(), config, bot.format)),

        Commands::Plan { snapshot, bot } => cli::load_config(bot.config.as_deref(), bot.kind, bot.seed)
            .and_then(|config| cli::plan::execute(snapshot.as_deref(), config, bot.format)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
