//! Mockloc CLI - replay scripted positions through the override router.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{inspect, replay};

#[derive(Debug, Parser)]
#[command(name = "mockloc", version, about = "Mockable location routing tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a script of timed fixes through an override router
    Replay(replay::ReplayArgs),
    /// Validate a replay script and print a summary
    Inspect(inspect::InspectArgs),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so script output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Replay(args) => replay::run(args).await,
        Command::Inspect(args) => inspect::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
