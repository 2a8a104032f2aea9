//! `zammad tickets` commands.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};
use colored::Colorize;

use crate::cli::{CloseArgs, ListArgs, ReplyArgs, SearchArgs, ShowArgs};
use crate::format::{format_article, format_ticket_detail, format_ticket_table};
use crate::models::{Article, CreateArticle, Ticket, TicketArticleUpdate, UpdateTicket};
use crate::prompt::Prompter;
use crate::zammad_client::ZammadClient;

/// Sender recorded on articles written from the CLI.
const AGENT_SENDER: &str = "Agent";

/// Lists one page of tickets, or searches by state when `--state` is given.
pub async fn list(client: &ZammadClient, args: ListArgs) -> Result<()> {
    tracing::debug!(?args, "tickets list called");

    let tickets = match args.state_query() {
        Some(query) => client.search_tickets(&query, args.page, args.per_page).await?,
        None => client.list_tickets(args.page, args.per_page).await?,
    };

    if tickets.is_empty() {
        println!("No tickets found.");
        return Ok(());
    }

    println!("{}", format_ticket_table(&tickets));
    println!("\n  Showing {} tickets (page {})", tickets.len(), args.page);
    Ok(())
}

/// Searches tickets with the server's query syntax.
pub async fn search(client: &ZammadClient, args: SearchArgs) -> Result<()> {
    let query = args.query.trim();
    tracing::debug!(query = %query, page = args.page, "tickets search called");

    let tickets = client
        .search_tickets(query, args.page, args.per_page)
        .await?;

    if tickets.is_empty() {
        println!("No tickets matching \"{}\".", query);
        return Ok(());
    }

    println!("{}", format_ticket_table(&tickets));
    println!(
        "\n  {} results for \"{}\" (page {})",
        tickets.len(),
        query,
        args.page
    );
    Ok(())
}

/// Shows ticket details, its web link and, unless disabled, the conversation.
pub async fn show(client: &ZammadClient, args: ShowArgs) -> Result<()> {
    tracing::debug!(ticket_id = args.id, "tickets show called");

    let ticket = client.get_ticket(args.id).await?;
    println!("{}", format_ticket_detail(&ticket));
    println!("  {} {}", "Link:".bold(), client.ticket_web_url(ticket.id));

    if !args.no_articles {
        let articles = client
            .list_articles(ticket.id)
            .await
            .with_context(|| format!("Failed to load articles for ticket {}", ticket.id))?;
        print_conversation(&articles);
    }

    Ok(())
}

/// Prints articles separated by rules. Prints nothing for an empty list.
pub(crate) fn print_conversation(articles: &[Article]) {
    if articles.is_empty() {
        return;
    }

    println!("\n{}\n", "─── Conversation ───".bold());
    for article in articles {
        println!("{}", format_article(article));
        println!("{}", "───".dimmed());
    }
}

/// Adds a reply or note to a ticket.
///
/// For the `email` type without `--to`, the recipient is the ticket's
/// customer. A missing message is prompted for.
pub async fn reply<R: BufRead, W: Write>(
    client: &ZammadClient,
    args: ReplyArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    tracing::debug!(
        ticket_id = args.id,
        article_type = %args.article_type,
        internal = args.internal,
        "tickets reply called"
    );

    let to = match (&args.to, args.is_email()) {
        (Some(to), _) => Some(to.clone()),
        (None, true) => {
            let ticket = client.get_ticket(args.id).await?;
            Some(email_recipient(&ticket)?)
        }
        (None, false) => None,
    };

    let body = match args.message {
        Some(message) => message,
        None => {
            let prompt = format!("Reply to ticket #{}:", args.id);
            match prompter.text(&prompt, reject_empty)? {
                Some(message) => message,
                None => {
                    prompter.say("Reply cancelled.")?;
                    return Ok(());
                }
            }
        }
    };

    let mut params = CreateArticle::new(args.id, body)
        .with_type(args.article_type)
        .with_internal(args.internal)
        .with_sender(AGENT_SENDER);
    if let Some(to) = to {
        params = params.with_to(to);
    }
    if let Some(cc) = args.cc {
        params = params.with_cc(cc);
    }
    if let Some(subject) = args.subject {
        params = params.with_subject(subject);
    }

    let article = client.create_article(params).await?;

    println!(
        "{} Article #{} added to ticket #{}{}",
        "✔".green(),
        article.id,
        args.id,
        if args.internal { " (internal)" } else { "" }
    );
    Ok(())
}

/// Closes a ticket after confirmation, optionally adding an internal note.
pub async fn close<R: BufRead, W: Write>(
    client: &ZammadClient,
    args: CloseArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    tracing::debug!(ticket_id = args.id, has_message = args.message.is_some(), "tickets close called");

    let ticket = client.get_ticket(args.id).await?;

    if !args.no_confirm {
        let question = format!("Close ticket #{} \"{}\"?", ticket.number, ticket.title);
        if prompter.confirm(&question, true)? != Some(true) {
            prompter.say("Cancelled.")?;
            return Ok(());
        }
    }

    client
        .update_ticket(ticket.id, &close_update(args.message))
        .await?;

    println!("{} Ticket #{} closed.", "✔".green(), ticket.number);
    Ok(())
}

/// Builds the close update, with an internal note when a message is given.
pub(crate) fn close_update(message: Option<String>) -> UpdateTicket {
    let update = UpdateTicket::new().with_state("closed");
    match message {
        Some(message) => update.with_article(TicketArticleUpdate::internal_note(message)),
        None => update,
    }
}

/// Returns the ticket's customer as the email recipient.
fn email_recipient(ticket: &Ticket) -> Result<String> {
    ticket
        .customer
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            anyhow!("Could not determine recipient from ticket. Use --to to specify one.")
        })
}

pub(crate) fn reject_empty(value: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| "Message cannot be empty".to_string())
}
