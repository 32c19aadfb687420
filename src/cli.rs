//! # CLI
//!
//! Command-line interface:
//! - `serve` (default): initialize the datastore and enter the serving loop
//! - `init`: create the datastore schema and exit

use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::config::{AppConfig, ConfigError};
use crate::http_server::{AppState, HttpServer, HttpServerConfig};
use crate::notify::Notifier;
use crate::store::{ReservationStore, StoreError};

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("datastore error: {0}")]
    Store(#[from] StoreError),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Babylon reservation service
#[derive(Debug, Parser)]
#[command(name = "babylon", version, about = "Restaurant table-reservation service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,

    /// Create the datastore schema and exit
    Init,
}

/// Run the selected command
pub async fn run(cli: Cli) -> CliResult<()> {
    let config = AppConfig::from_env()?;
    let store = ReservationStore::new(&config.db_file);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Init => {
            store.init().await?;
            info!("datastore initialized at {}", config.db_file);
        }
        Command::Serve => {
            store.init().await?;

            let notifier = Notifier::new(config.email_config());
            let state = Arc::new(AppState::new(store, notifier));

            let http_config = HttpServerConfig::from_env()?;
            HttpServer::with_config(http_config, state).start().await?;
        }
    }

    Ok(())
}
