//! `zammad` - command-line client for the Zammad helpdesk
//!
//! # Configuration
//!
//! Run `zammad auth login` once, or set the following environment variables
//! (a `.env` file is honored):
//!
//! - `ZAMMAD_URL`: Base URL of your Zammad instance
//! - `ZAMMAD_TOKEN`: API access token
//!
//! # Usage
//!
//! ```bash
//! zammad tickets list --state open
//! zammad tickets show 42
//! zammad tickets reply 42 "On it" --internal
//! zammad interactive
//! ```

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};

use zammad_cli::cli::Cli;
use zammad_cli::commands;

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries command output
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zammad_cli=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    tracing::debug!("Starting zammad v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = commands::run(cli).await {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("{}", commands::describe_error(&e).as_str().red());
        std::process::exit(1);
    }
}
