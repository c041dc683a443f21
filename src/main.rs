use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                fxconv::AppCommand::Convert { amount, from, to }
            }
            Commands::Bulk { amount, from, to } => fxconv::AppCommand::Bulk { amount, from, to },
            Commands::Rates { bases } => fxconv::AppCommand::Rates { bases },
            Commands::Currencies => fxconv::AppCommand::Currencies,
            Commands::Session { export } => fxconv::AppCommand::Session { export },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount from one currency to another
    Convert {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        from: String,
        to: String,
    },
    /// Convert an amount into several currencies at once
    Bulk {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        from: String,
        /// Target currencies (defaults to every supported currency)
        #[arg(short, long, num_args = 1..)]
        to: Vec<String>,
    },
    /// Show exchange rates for one or more base currencies
    Rates { bases: Vec<String> },
    /// List supported currencies
    Currencies,
    /// Convert `AMOUNT FROM TO` lines read from stdin and show the history
    Session {
        /// Write the conversion history to a CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
