//! # zammad-cli
//!
//! A command-line client for the Zammad helpdesk.
//!
//! The library half of the crate holds a typed client for the Zammad REST
//! API; the `zammad` binary layers commands, prompts and table rendering on
//! top of it.
//!
//! ## Features
//!
//! - **Tickets**: list, search, show, reply to and close tickets
//! - **Full listing**: walk every page of tickets with [`pagination::fetch_all_tickets`]
//! - **Errors**: non-success responses are classified by status code
//! - **Security**: the access token is never logged and is redacted from error text
//!
//! ## Architecture
//!
//! - [`config`] - Credential resolution from the environment and the config file
//! - [`error`] - Error types with token sanitization
//! - [`zammad_client`] - HTTP client for the Zammad API
//! - [`pagination`] - Sequential page aggregation
//! - [`models`] - Data models for API requests and responses
//! - [`format`] - Terminal rendering of tickets and articles
//! - [`prompt`] - Line-based interactive prompts
//! - [`cli`] - Command-line argument definitions
//! - [`commands`] - Command implementations
//!
//! ## Configuration
//!
//! Credentials are saved by `zammad auth login`. The environment variables
//! `ZAMMAD_URL` and `ZAMMAD_TOKEN` take precedence over saved values.
//!
//! Optional:
//! - `RUST_LOG`: Log level (e.g., `zammad_cli=debug`)
//!
//! ## Example
//!
//! Using the [`ZammadClient`](zammad_client::ZammadClient) directly:
//!
//! ```ignore
//! use zammad_cli::config::{Config, ConfigStore};
//! use zammad_cli::zammad_client::ZammadClient;
//!
//! async fn example() -> Result<(), zammad_cli::error::ZammadError> {
//!     let config = Config::load(&ConfigStore::default_location()?)?;
//!     let client = ZammadClient::new(&config)?;
//!
//!     for ticket in client.search_tickets("state.name:open", 1, 25).await? {
//!         println!("#{}: {}", ticket.number, ticket.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod pagination;
pub mod prompt;
pub mod zammad_client;
