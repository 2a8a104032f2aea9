//! Command implementations for the `zammad` binary.
//!
//! Each command sanitizes its arguments, calls the API client and prints
//! its result to stdout. Failures propagate as `anyhow::Error`; the binary
//! turns them into a user-facing message with [`describe_error`] and exits
//! with status 1.

pub mod auth;
pub mod interactive;
pub mod tickets;

use anyhow::Result;

use crate::cli::{AuthCommands, Cli, Commands, ListArgs, TicketCommands};
use crate::config::{Config, ConfigStore};
use crate::error::{ApiErrorKind, ZammadError};
use crate::prompt::Prompter;
use crate::zammad_client::ZammadClient;

/// Dispatches a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let store = ConfigStore::default_location()?;

    match cli.command {
        Commands::Auth { command } => match command {
            AuthCommands::Login(args) => {
                auth::login(args.sanitize(), &store, &mut Prompter::stdio()).await
            }
            AuthCommands::Status => auth::status(&store).await,
            AuthCommands::Logout => auth::logout(&store),
        },
        Commands::Tickets { command } => {
            let client = connect(&store)?;
            match command {
                TicketCommands::List(args) => tickets::list(&client, args.sanitize()).await,
                TicketCommands::Search(args) => tickets::search(&client, args).await,
                TicketCommands::Show(args) => tickets::show(&client, args).await,
                TicketCommands::Reply(args) => {
                    tickets::reply(&client, args.sanitize(), &mut Prompter::stdio()).await
                }
                TicketCommands::Close(args) => {
                    tickets::close(&client, args.sanitize(), &mut Prompter::stdio()).await
                }
            }
        }
        Commands::Interactive => {
            interactive::run(&connect(&store)?, &mut Prompter::stdio()).await
        }
        Commands::Open => tickets::list(&connect(&store)?, ListArgs::for_state("open")).await,
        Commands::New => tickets::list(&connect(&store)?, ListArgs::for_state("new")).await,
    }
}

/// Resolves the configuration and builds an API client.
pub fn connect(store: &ConfigStore) -> Result<ZammadClient> {
    let config = Config::load(store)?;
    tracing::debug!(base_url = %config.url, "Configuration loaded");

    let client = ZammadClient::new(&config)?;
    Ok(client)
}

/// Translates an error into the message shown to the user.
///
/// API errors get a hint keyed on their status; configuration errors show
/// their own message. Anything else is printed with its context chain.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ZammadError>() {
        Some(ZammadError::Api { status, detail, .. }) => {
            match ApiErrorKind::from_status(*status) {
                ApiErrorKind::Unauthorized => {
                    "Authentication failed. Run `zammad auth login` to reconfigure.".to_string()
                }
                ApiErrorKind::Forbidden => {
                    "Permission denied. Your token may lack the required scope.".to_string()
                }
                ApiErrorKind::NotFound => format!("Not found: {}", detail),
                ApiErrorKind::Other => format!("API error ({}): {}", status, detail),
            }
        }
        Some(ZammadError::Config(message)) => message.clone(),
        _ => format!("{:#}", err),
    }
}
