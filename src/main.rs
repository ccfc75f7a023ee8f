mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roster_core::config::RosterConfig;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ROSTER_LOG";

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Look up event participants and export them to a spreadsheet")]
struct Cli {
    /// Log requests and state changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the events participants can be looked up for
    Events,
    /// Show the participants of one event
    Participants {
        /// Event id (prompts with the event list when omitted)
        #[arg(short, long)]
        event: Option<String>,

        /// Save the participants to participants.xlsx
        #[arg(long)]
        export: bool,

        /// Directory to save participants.xlsx in
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print participants as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show config file location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = RosterConfig::load().context("Failed to load configuration")?;

    match cli.command {
        Commands::Events => commands::events::run(&config).await,
        Commands::Participants {
            event,
            export,
            output,
            json,
        } => {
            let options = commands::participants::Options {
                event,
                export,
                output,
                json,
            };
            commands::participants::run(&config, options).await
        }
        Commands::Config => commands::config::run(&config),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "roster=debug,roster_core=debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
