//! Command-line argument definitions.
//!
//! The command tree mirrors the resource layout: `auth` and `tickets`
//! groups, the `interactive` browser, and the `open`/`new` shortcuts.
//!
//! # Input Sanitization
//!
//! Argument structs with free-text fields implement `sanitize()`, which
//! trims whitespace and drops values that end up empty. Commands call it
//! before using the arguments.

use clap::{Args, Parser, Subcommand};

/// Default page size for `tickets list` and `tickets search`.
pub const DEFAULT_LIST_PER_PAGE: u32 = 25;

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Zammad helpdesk CLI.
#[derive(Debug, Parser)]
#[command(name = "zammad", version, about = "Zammad helpdesk CLI")]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage authentication
    Auth {
        /// Auth subcommand.
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Manage tickets
    #[command(alias = "t")]
    Tickets {
        /// Tickets subcommand.
        #[command(subcommand)]
        command: TicketCommands,
    },

    /// Interactive ticket browser
    #[command(alias = "i")]
    Interactive,

    /// Shortcut: list open tickets
    Open,

    /// Shortcut: list new tickets
    New,
}

/// `auth` subcommands.
#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Configure Zammad URL and API token
    Login(LoginArgs),

    /// Show current authentication status
    Status,

    /// Remove stored credentials
    Logout,
}

/// Arguments for `auth login`. Missing values are prompted for.
#[derive(Debug, Clone, Default, Args)]
pub struct LoginArgs {
    /// Zammad instance URL (e.g., https://support.example.com)
    #[arg(long)]
    pub url: Option<String>,

    /// API access token
    #[arg(long)]
    pub token: Option<String>,
}

impl LoginArgs {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            url: trim_option(&self.url),
            token: trim_option(&self.token),
        }
    }
}

/// `tickets` subcommands.
#[derive(Debug, Subcommand)]
pub enum TicketCommands {
    /// List tickets
    List(ListArgs),

    /// Search tickets (Elasticsearch syntax)
    #[command(after_help = "Examples:\n  \
        zammad tickets search \"DNS issue\"\n  \
        zammad tickets search \"title:Deploy*\"\n  \
        zammad tickets search \"title:Deploy* AND state.name:open\"\n  \
        zammad tickets search \"customer.email:user@example.com\"")]
    Search(SearchArgs),

    /// Show ticket details and conversation
    Show(ShowArgs),

    /// Add a reply or note to a ticket
    Reply(ReplyArgs),

    /// Close a ticket (set state to closed)
    Close(CloseArgs),
}

/// Arguments for `tickets list`.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Page number
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Results per page
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIST_PER_PAGE)]
    pub per_page: u32,

    /// Filter by state (e.g., open, new, closed)
    #[arg(short, long)]
    pub state: Option<String>,
}

impl ListArgs {
    /// Arguments for listing the first page of tickets in `state`.
    pub fn for_state(state: &str) -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_LIST_PER_PAGE,
            state: Some(state.to_string()),
        }
    }

    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            state: trim_option(&self.state),
            ..self
        }
    }

    /// Returns the search query for the state filter, if any.
    pub fn state_query(&self) -> Option<String> {
        self.state.as_ref().map(|s| format!("state.name:{}", s))
    }
}

/// Arguments for `tickets search`.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Page number
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Results per page
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIST_PER_PAGE)]
    pub per_page: u32,
}

/// Arguments for `tickets show`.
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Ticket ID
    pub id: u64,

    /// Skip loading articles
    #[arg(long)]
    pub no_articles: bool,
}

/// Arguments for `tickets reply`.
#[derive(Debug, Clone, Args)]
pub struct ReplyArgs {
    /// Ticket ID
    pub id: u64,

    /// Message body; prompted for when omitted
    pub message: Option<String>,

    /// Mark as internal note
    #[arg(short, long)]
    pub internal: bool,

    /// Article type: note, email, phone
    #[arg(short = 't', long = "type", default_value = "note")]
    pub article_type: String,

    /// Article subject
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Recipient email (auto-filled from ticket customer for email type)
    #[arg(long)]
    pub to: Option<String>,

    /// CC recipients (comma-separated)
    #[arg(long)]
    pub cc: Option<String>,
}

impl ReplyArgs {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            id: self.id,
            message: trim_option(&self.message),
            internal: self.internal,
            article_type: self.article_type.trim().to_lowercase(),
            subject: trim_option(&self.subject),
            to: trim_option(&self.to),
            cc: trim_option(&self.cc),
        }
    }

    /// Returns true if the reply goes out as an email.
    pub fn is_email(&self) -> bool {
        self.article_type == "email"
    }
}

/// Arguments for `tickets close`.
#[derive(Debug, Clone, Args)]
pub struct CloseArgs {
    /// Ticket ID
    pub id: u64,

    /// Add a closing note
    #[arg(short, long)]
    pub message: Option<String>,

    /// Skip confirmation prompt
    #[arg(long)]
    pub no_confirm: bool,
}

impl CloseArgs {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            message: trim_option(&self.message),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("zammad").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_trim_option() {
        assert_eq!(trim_option(&Some("  open ".to_string())), Some("open".to_string()));
        assert_eq!(trim_option(&Some("   ".to_string())), None);
        assert_eq!(trim_option(&None), None);
    }

    #[test]
    fn test_list_defaults() {
        let cli = parse(&["tickets", "list"]);
        let Commands::Tickets {
            command: TicketCommands::List(args),
        } = cli.command
        else {
            panic!("expected tickets list");
        };
        assert_eq!(args.page, 1);
        assert_eq!(args.per_page, 25);
        assert!(args.state.is_none());
        assert!(args.state_query().is_none());
    }

    #[test]
    fn test_list_alias_and_state() {
        let cli = parse(&["t", "list", "-s", "open", "-p", "2", "-n", "10"]);
        let Commands::Tickets {
            command: TicketCommands::List(args),
        } = cli.command
        else {
            panic!("expected tickets list");
        };
        assert_eq!(args.page, 2);
        assert_eq!(args.per_page, 10);
        assert_eq!(args.state_query().as_deref(), Some("state.name:open"));
    }

    #[test]
    fn test_reply_options() {
        let cli = parse(&[
            "tickets", "reply", "42", "On it", "-i", "-t", "email", "--to", "a@example.com",
        ]);
        let Commands::Tickets {
            command: TicketCommands::Reply(args),
        } = cli.command
        else {
            panic!("expected tickets reply");
        };
        let args = args.sanitize();
        assert_eq!(args.id, 42);
        assert_eq!(args.message.as_deref(), Some("On it"));
        assert!(args.internal);
        assert!(args.is_email());
        assert_eq!(args.to.as_deref(), Some("a@example.com"));
        assert!(args.cc.is_none());
    }

    #[test]
    fn test_reply_default_type_is_note() {
        let cli = parse(&["tickets", "reply", "7"]);
        let Commands::Tickets {
            command: TicketCommands::Reply(args),
        } = cli.command
        else {
            panic!("expected tickets reply");
        };
        assert_eq!(args.article_type, "note");
        assert!(args.message.is_none());
        assert!(!args.internal);
    }

    #[test]
    fn test_close_flags() {
        let cli = parse(&["tickets", "close", "5", "-m", " fixed ", "--no-confirm"]);
        let Commands::Tickets {
            command: TicketCommands::Close(args),
        } = cli.command
        else {
            panic!("expected tickets close");
        };
        let args = args.sanitize();
        assert!(args.no_confirm);
        assert_eq!(args.message.as_deref(), Some("fixed"));
    }

    #[test]
    fn test_show_rejects_non_numeric_id() {
        let result = Cli::try_parse_from(["zammad", "tickets", "show", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_shortcuts_and_interactive_alias() {
        assert!(matches!(parse(&["open"]).command, Commands::Open));
        assert!(matches!(parse(&["new"]).command, Commands::New));
        assert!(matches!(parse(&["i"]).command, Commands::Interactive));
        assert_eq!(
            ListArgs::for_state("new").state_query().as_deref(),
            Some("state.name:new")
        );
    }

    #[test]
    fn test_login_args_sanitize() {
        let cli = parse(&["auth", "login", "--url", " https://x.example.com ", "--token", " "]);
        let Commands::Auth {
            command: AuthCommands::Login(args),
        } = cli.command
        else {
            panic!("expected auth login");
        };
        let args = args.sanitize();
        assert_eq!(args.url.as_deref(), Some("https://x.example.com"));
        assert!(args.token.is_none());
    }
}
