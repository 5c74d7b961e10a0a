//! ScrollDepth CLI - replay scroll sessions and inspect tracker behaviour.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "scrolldepth", version, about = "Scroll-depth tracking toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a recorded scroll session and print the emitted events
    Replay(commands::replay::ReplayArgs),
    /// Print the percentage-mark table for a document height
    Marks(commands::marks::MarksArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let result: Result<(), CliError> = match cli.command {
        Command::Replay(args) => commands::replay::run(args),
        Command::Marks(args) => commands::marks::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
