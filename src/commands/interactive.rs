//! `zammad interactive`: pick a ticket from the full listing and act on it.

use std::io::{BufRead, Write};

use anyhow::Result;
use colored::Colorize;

use crate::commands::tickets::{close_update, print_conversation, reject_empty};
use crate::format::format_ticket_detail;
use crate::models::{CreateArticle, Ticket};
use crate::pagination::fetch_all_tickets;
use crate::prompt::Prompter;
use crate::zammad_client::ZammadClient;

/// Page size used when loading tickets for the browser.
pub const INTERACTIVE_PER_PAGE: u32 = 100;

/// Page cap used when loading tickets for the browser.
pub const INTERACTIVE_MAX_PAGES: u32 = 10;

/// Action offered for the selected ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// View details and conversation.
    Show,
    /// Add a public note.
    Reply,
    /// Close the ticket.
    Close,
    /// Leave without doing anything.
    Back,
}

impl Action {
    /// All actions in menu order.
    pub const ALL: [Action; 4] = [Action::Show, Action::Reply, Action::Close, Action::Back];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Action::Show => "View details & conversation",
            Action::Reply => "Add a reply",
            Action::Close => "Close this ticket",
            Action::Back => "Go back",
        }
    }
}

/// Runs the interactive browser.
pub async fn run<R: BufRead, W: Write>(
    client: &ZammadClient,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say(&"Zammad Interactive Mode".bold().to_string())?;
    prompter.say("Loading tickets…")?;

    let tickets = fetch_all_tickets(client, INTERACTIVE_PER_PAGE, INTERACTIVE_MAX_PAGES).await?;
    prompter.say(&format!("Loaded {} tickets", tickets.len()))?;

    if tickets.is_empty() {
        prompter.say("No tickets found.")?;
        return Ok(());
    }

    let Some(filter) = prompter.text("Filter (blank for all):", |_| None)? else {
        prompter.say("Exited.")?;
        return Ok(());
    };

    let matches = filter_tickets(&tickets, &filter);
    if matches.is_empty() {
        prompter.say(&format!("No tickets matching \"{}\".", filter))?;
        return Ok(());
    }

    let labels: Vec<String> = matches.iter().map(|t| ticket_label(t)).collect();
    let Some(index) = prompter.select("Select a ticket:", &labels)? else {
        prompter.say("Exited.")?;
        return Ok(());
    };
    let selected_id = matches[index].id;

    let labels = Action::ALL.map(Action::label);
    let action = match prompter.select("What would you like to do?", &labels)? {
        Some(i) => Action::ALL[i],
        None => Action::Back,
    };
    tracing::debug!(ticket_id = selected_id, ?action, "interactive action chosen");

    if action == Action::Back {
        prompter.say("Done.")?;
        return Ok(());
    }

    let ticket = client.get_ticket(selected_id).await?;

    match action {
        Action::Show => {
            println!("\n{}", format_ticket_detail(&ticket));
            let articles = client.list_articles(ticket.id).await?;
            print_conversation(&articles);
        }
        Action::Reply => {
            if let Some(message) = prompter.text("Your reply:", reject_empty)? {
                let params = CreateArticle::new(ticket.id, message)
                    .with_type("note")
                    .with_internal(false);
                client.create_article(params).await?;
                prompter.say(&format!("{} Reply added.", "✔".green()))?;
            }
        }
        Action::Close => {
            client.update_ticket(ticket.id, &close_update(None)).await?;
            prompter.say(&format!("{} Ticket #{} closed.", "✔".green(), ticket.number))?;
        }
        Action::Back => {}
    }

    prompter.say("Done.")?;
    Ok(())
}

/// Returns the tickets whose label contains `filter`, ignoring case.
///
/// A blank filter keeps every ticket.
pub fn filter_tickets<'a>(tickets: &'a [Ticket], filter: &str) -> Vec<&'a Ticket> {
    let needle = filter.trim().to_lowercase();
    tickets
        .iter()
        .filter(|t| needle.is_empty() || ticket_label(t).to_lowercase().contains(&needle))
        .collect()
}

/// Menu label for a ticket: number, title, state and customer.
pub fn ticket_label(ticket: &Ticket) -> String {
    format!(
        "#{} {} ({} · {})",
        ticket.number,
        ticket.title,
        ticket.display_state(),
        ticket.customer.as_deref().unwrap_or("")
    )
}
