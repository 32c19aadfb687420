//! babylon CLI entry point
//!
//! This is a minimal entrypoint that:
//! 1. Initializes logging
//! 2. Parses CLI arguments
//! 3. Dispatches to CLI commands (via cli::run)
//! 4. Prints errors to stderr and exits non-zero on failure
//!
//! All logic is delegated to the CLI module.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use babylon::cli::{self, Cli};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
