//! tabular-agent CLI - Replay recorded experience through a tabular agent
//!
//! This CLI provides:
//! - Offline replay of JSON Lines transition logs
//! - Inspection of the effective agent configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use tabular_agent::cli::{commands, logging};

#[derive(Parser)]
#[command(name = "tabular-agent")]
#[command(version, about = "Tabular epsilon-greedy TD agent", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a transition log and report what the agent learned
    Replay(commands::replay::ReplayArgs),

    /// Print or save the agent configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Replay(args) => commands::replay::execute(args),
        Commands::Config(args) => commands::config::execute(args),
    }
}
