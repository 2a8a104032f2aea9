//! `zammad auth` commands.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};
use colored::Colorize;

use crate::cli::LoginArgs;
use crate::config::{has_config, Config, ConfigStore};
use crate::prompt::Prompter;
use crate::zammad_client::ZammadClient;

/// Prompts for missing credentials, verifies them and saves them.
///
/// Credentials are saved only after `GET /api/v1/users/me` succeeds.
pub async fn login<R: BufRead, W: Write>(
    args: LoginArgs,
    store: &ConfigStore,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    tracing::debug!(url = ?args.url, has_token = args.token.is_some(), "auth login called");

    prompter.say(&"Zammad CLI - Login".bold().to_string())?;

    let url = match args.url {
        Some(url) => url,
        None => match prompter.text("Zammad instance URL:", |value| {
            Config::validate_url(value).err().map(|e| e.to_string())
        })? {
            Some(url) => url,
            None => return cancelled(),
        },
    };
    let url = Config::validate_url(&url)?;

    let token = match args.token {
        Some(token) => token,
        None => match prompter.secret("API access token:")? {
            Some(token) => token,
            None => return cancelled(),
        },
    };
    Config::validate_token(&token)?;

    prompter.say("Verifying credentials…")?;

    let config = Config::new(url, token);
    let client = ZammadClient::new(&config)?;

    match client.current_user().await {
        Ok(user) => {
            store.save(&config.url, config.token())?;
            prompter.say(&format!(
                "Authenticated as {} ({})",
                user.display_name().cyan(),
                user.email
            ))?;
            prompter.say(&"Configuration saved!".green().to_string())?;
            Ok(())
        }
        Err(e) => {
            let sanitized = e.sanitized_display(config.token());
            tracing::warn!(error = %sanitized, "Login verification failed");
            prompter.say(&format!("{} {}", "Authentication failed.".red(), sanitized))?;
            Err(anyhow!("Check your URL and token, then try again."))
        }
    }
}

/// Reports whether stored or environment credentials work.
pub async fn status(store: &ConfigStore) -> Result<()> {
    if !has_config(store) {
        println!("Not configured. Run `zammad auth login`.");
        return Ok(());
    }

    let config = Config::load(store)?;
    let result = match ZammadClient::new(&config) {
        Ok(client) => client.current_user().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(user) => {
            println!("{} Logged in as {}", "✔".green(), user.display_name().bold());
            println!("  URL:   {}", config.url);
            println!("  Email: {}", user.email);
        }
        Err(e) => {
            tracing::warn!(error = %e.sanitized_display(config.token()), "Stored credentials rejected");
            println!("{}", "✖ Stored credentials are invalid.".red());
        }
    }

    Ok(())
}

/// Removes stored credentials.
pub fn logout(store: &ConfigStore) -> Result<()> {
    store.clear()?;
    println!("{} Credentials removed.", "✔".green());
    Ok(())
}

fn cancelled() -> Result<()> {
    println!("Cancelled.");
    Ok(())
}
