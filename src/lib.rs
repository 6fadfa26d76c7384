pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Rates {
        years: Vec<i64>,
        search: Option<String>,
        table: bool,
    },
    Country { iso3: String },
    Top {
        year: Option<i64>,
        n: Option<u32>,
        table: bool,
    },
    Health,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("ratesfetch starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let client = providers::RatesClient::new(&config.origin)?;

    match command {
        AppCommand::Rates {
            years,
            search,
            table,
        } => cli::rates::run(&client, &years, config.year, search.as_deref(), table).await,
        AppCommand::Country { iso3 } => cli::country::run(&client, &iso3).await,
        AppCommand::Top { year, n, table } => {
            cli::top::run(&client, year.or(config.year), n, table).await
        }
        AppCommand::Health => cli::health::run(&client).await,
    }
}
