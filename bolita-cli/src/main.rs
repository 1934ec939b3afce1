mod commands;
mod config;
mod ticket;

use bolita_core::BolitaError;
use clap::{Parser, Subcommand};
use config::CliConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bolita")]
#[command(about = "Bolita - numbers lottery pricing and settlement")]
#[command(version)]
struct Cli {
    /// Data directory holding config.json
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Engine configuration file (overrides the data directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which game a bet number is
    Classify {
        /// Bet number as keyed in
        bet: String,
        #[command(flatten)]
        selection: commands::Selection,
    },
    /// Price a single play
    Price(commands::PriceArgs),
    /// Settle tickets against published results
    Settle {
        /// JSON file with the tickets to settle
        #[arg(long)]
        tickets: PathBuf,
        /// JSON file with published results
        #[arg(long)]
        results: PathBuf,
        /// Print the winner report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the grand total of each ticket
    Total {
        /// JSON file with the tickets
        #[arg(long)]
        tickets: PathBuf,
    },
    /// Show the effective prize table
    Prizes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cli_config = CliConfig {
        data_dir: cli.data_dir.unwrap_or_else(config::default_data_dir),
        config_file: cli.config,
        verbose: cli.verbose,
    };

    // Initialize logging
    let log_level = if cli_config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "bolita={},bolita_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match cli_config.load_engine_config() {
        Ok(engine) => match cli.command {
            Commands::Classify { bet, selection } => {
                commands::handle_classify(&bet, &selection, &engine)
            }
            Commands::Price(args) => commands::handle_price(args, &engine),
            Commands::Settle {
                tickets,
                results,
                json,
            } => commands::handle_settle(&tickets, &results, json, engine).await,
            Commands::Total { tickets } => commands::handle_total(&tickets, &engine).await,
            Commands::Prizes { json } => commands::handle_prizes(&engine, json),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        match e.chain().find_map(|cause| cause.downcast_ref::<BolitaError>()) {
            Some(BolitaError::Config(msg)) => {
                eprintln!("Error: invalid configuration: {}", msg);
                eprintln!(
                    "Check {} or pass --config",
                    cli_config.data_dir.join(config::CONFIG_FILE).display()
                );
            }
            Some(BolitaError::InvalidGameMode(tag)) => {
                eprintln!("Error: unknown game '{}'", tag);
                eprintln!("Use 'bolita prizes' to see the available games");
            }
            _ => {
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
