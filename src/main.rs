use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ratesfetch::core::log::init_logging;

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

impl From<Commands> for ratesfetch::AppCommand {
    fn from(cmd: Commands) -> ratesfetch::AppCommand {
        match cmd {
            Commands::Rates {
                years,
                search,
                table,
            } => ratesfetch::AppCommand::Rates {
                years,
                search,
                table,
            },
            Commands::Country { iso3 } => ratesfetch::AppCommand::Country { iso3 },
            Commands::Top { year, n, table } => ratesfetch::AppCommand::Top { year, n, table },
            Commands::Health => ratesfetch::AppCommand::Health,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch rates for one or more years
    Rates {
        /// Year to fetch; repeat to fetch several years concurrently
        #[arg(short, long = "year", allow_negative_numbers = true)]
        years: Vec<i64>,
        /// Only keep countries whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Render the result records as a table
        #[arg(long)]
        table: bool,
    },
    /// Fetch the time series of a country by ISO3 code
    Country {
        /// ISO3 country code, e.g. SWE
        iso3: String,
    },
    /// Fetch the top countries by rate
    Top {
        /// Year to rank; defaults to the latest the server has
        #[arg(short, long, allow_negative_numbers = true)]
        year: Option<i64>,
        /// Number of countries to return
        #[arg(short, long)]
        n: Option<u32>,
        /// Render the result records as a table
        #[arg(long)]
        table: bool,
    },
    /// Check that the rates server is up
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ratesfetch::cli::setup::setup(),
        Some(cmd) => ratesfetch::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
