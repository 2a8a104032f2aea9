//! Ticket models for the Zammad API.
//!
//! With `expand=true` Zammad adds human-readable names (`state`, `priority`,
//! `owner`, `customer`, `group`) next to the numeric `_id` references. Those
//! names are optional here because plain responses omit them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ticket as returned by the Zammad API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: u64,

    /// Display number shown to users (e.g., "10042").
    #[serde(default)]
    pub number: String,

    /// Ticket title.
    #[serde(default)]
    pub title: String,

    /// Group reference.
    #[serde(default)]
    pub group_id: Option<u64>,

    /// Priority reference.
    #[serde(default)]
    pub priority_id: Option<u64>,

    /// State reference.
    #[serde(default)]
    pub state_id: Option<u64>,

    /// Organization reference.
    #[serde(default)]
    pub organization_id: Option<u64>,

    /// Owner (agent) reference.
    #[serde(default)]
    pub owner_id: Option<u64>,

    /// Customer reference.
    #[serde(default)]
    pub customer_id: Option<u64>,

    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,

    /// Number of articles attached to the ticket.
    #[serde(default)]
    pub article_count: Option<u32>,

    /// Pending reminder time.
    #[serde(default)]
    pub pending_time: Option<DateTime<Utc>>,

    /// Next escalation time.
    #[serde(default)]
    pub escalation_at: Option<DateTime<Utc>>,

    /// First response time.
    #[serde(default)]
    pub first_response_at: Option<DateTime<Utc>>,

    /// Close time.
    #[serde(default)]
    pub close_at: Option<DateTime<Utc>>,

    /// Last contact time.
    #[serde(default)]
    pub last_contact_at: Option<DateTime<Utc>>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Expanded group name.
    #[serde(default)]
    pub group: Option<String>,

    /// Expanded state name.
    #[serde(default)]
    pub state: Option<String>,

    /// Expanded priority name.
    #[serde(default)]
    pub priority: Option<String>,

    /// Expanded owner login.
    #[serde(default)]
    pub owner: Option<String>,

    /// Expanded customer login or email.
    #[serde(default)]
    pub customer: Option<String>,
}

impl Ticket {
    /// Returns the state name or "unknown".
    pub fn display_state(&self) -> &str {
        self.state.as_deref().unwrap_or("unknown")
    }

    /// Returns the priority name, falling back to its numeric ID.
    pub fn display_priority(&self) -> String {
        name_or_id(self.priority.as_deref(), self.priority_id)
    }

    /// Returns the customer name, falling back to its numeric ID.
    pub fn display_customer(&self) -> String {
        name_or_id(self.customer.as_deref(), self.customer_id)
    }

    /// Returns the group name, falling back to its numeric ID.
    pub fn display_group(&self) -> String {
        name_or_id(self.group.as_deref(), self.group_id)
    }

    /// Returns the owner name or "unassigned".
    pub fn display_owner(&self) -> &str {
        self.owner.as_deref().unwrap_or("unassigned")
    }
}

fn name_or_id(name: Option<&str>, id: Option<u64>) -> String {
    match (name, id) {
        (Some(name), _) => name.to_string(),
        (None, Some(id)) => id.to_string(),
        (None, None) => "-".to_string(),
    }
}

/// Nested article created together with a ticket update.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TicketArticleUpdate {
    /// Article subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Article body.
    pub body: String,

    /// Article type (e.g., "note").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub article_type: Option<String>,

    /// Whether the article is internal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal: Option<bool>,
}

impl TicketArticleUpdate {
    /// Creates an internal note with the given body.
    pub fn internal_note(body: impl Into<String>) -> Self {
        Self {
            subject: None,
            body: body.into(),
            article_type: Some("note".to_string()),
            internal: Some(true),
        }
    }
}

/// Partial ticket update. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct UpdateTicket {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New group name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// New state name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// New state ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<u64>,

    /// New priority name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// New owner ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,

    /// Article to add in the same request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<TicketArticleUpdate>,
}

impl UpdateTicket {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the state name.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the priority name.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Attaches an article to the update.
    pub fn with_article(mut self, article: TicketArticleUpdate) -> Self {
        self.article = Some(article);
        self
    }
}
