//! Article models for the Zammad API.
//!
//! An article is a single message or note in a ticket's conversation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::deserialize_string_or_int;

/// Default content type for new articles.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Default article type for new articles.
pub const DEFAULT_ARTICLE_TYPE: &str = "note";

/// Default sender for new articles.
pub const DEFAULT_SENDER: &str = "Agent";

/// An article attached to a ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Article {
    /// Unique article ID.
    pub id: u64,

    /// Parent ticket ID.
    #[serde(default)]
    pub ticket_id: u64,

    /// Article type reference.
    #[serde(default)]
    pub type_id: Option<u64>,

    /// Sender reference.
    #[serde(default)]
    pub sender_id: Option<u64>,

    /// From address or name.
    #[serde(default)]
    pub from: Option<String>,

    /// To recipients.
    #[serde(default)]
    pub to: Option<String>,

    /// CC recipients.
    #[serde(default)]
    pub cc: Option<String>,

    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// Reply-To address.
    #[serde(default)]
    pub reply_to: Option<String>,

    /// Email message ID.
    #[serde(default)]
    pub message_id: Option<String>,

    /// MIME type of the body (`text/html` or `text/plain`).
    #[serde(default)]
    pub content_type: String,

    /// Raw body content.
    #[serde(default)]
    pub body: String,

    /// Whether the article is visible to agents only.
    #[serde(default)]
    pub internal: bool,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Attached files.
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Expanded article type name.
    #[serde(rename = "type", default)]
    pub article_type: Option<String>,

    /// Expanded sender name.
    #[serde(default)]
    pub sender: Option<String>,

    /// Expanded creator login.
    #[serde(default)]
    pub created_by: Option<String>,

    /// Expanded last updater login.
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl Article {
    /// Returns true if the body carries HTML markup.
    pub fn is_html(&self) -> bool {
        self.content_type.eq_ignore_ascii_case("text/html")
    }

    /// Returns the author: the from field, else the creator, else "Unknown".
    pub fn display_from(&self) -> &str {
        self.from
            .as_deref()
            .or(self.created_by.as_deref())
            .unwrap_or("Unknown")
    }

    /// Returns the article type name, defaulting to "note".
    pub fn display_type(&self) -> &str {
        self.article_type.as_deref().unwrap_or(DEFAULT_ARTICLE_TYPE)
    }
}

/// A file attached to an article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    /// Unique attachment ID.
    pub id: u64,

    /// File name.
    #[serde(default)]
    pub filename: String,

    /// Size in bytes, as reported by the server.
    #[serde(default, deserialize_with = "deserialize_string_or_int")]
    pub size: String,

    /// MIME metadata (`Content-Type`, `Mime-Type`, ...).
    #[serde(default)]
    pub preferences: HashMap<String, serde_json::Value>,
}

/// Parameters for creating an article.
///
/// `ticket_id` and `body` are required. The remaining fields are optional;
/// [`CreateArticle::resolve`] fills the unset ones with defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateArticle {
    /// Ticket to attach the article to.
    pub ticket_id: u64,
    /// Article body.
    pub body: String,
    /// To recipients.
    pub to: Option<String>,
    /// CC recipients.
    pub cc: Option<String>,
    /// Subject line.
    pub subject: Option<String>,
    /// Body MIME type.
    pub content_type: Option<String>,
    /// Article type: note, email, phone or web.
    pub article_type: Option<String>,
    /// Internal visibility flag.
    pub internal: Option<bool>,
    /// Sender: Agent, Customer or System.
    pub sender: Option<String>,
    /// Time accounting units.
    pub time_unit: Option<String>,
}

impl CreateArticle {
    /// Creates parameters with only the required fields set.
    pub fn new(ticket_id: u64, body: impl Into<String>) -> Self {
        Self {
            ticket_id,
            body: body.into(),
            ..Default::default()
        }
    }

    /// Sets the article type.
    pub fn with_type(mut self, article_type: impl Into<String>) -> Self {
        self.article_type = Some(article_type.into());
        self
    }

    /// Sets the internal flag.
    pub fn with_internal(mut self, internal: bool) -> Self {
        self.internal = Some(internal);
        self
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the To recipients.
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Sets the CC recipients.
    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc = Some(cc.into());
        self
    }

    /// Sets the sender.
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Resolves defaults field by field.
    ///
    /// A field is defaulted only when it is `None`; any caller value,
    /// including `internal: Some(false)`, is kept as given.
    pub fn resolve(self) -> NewArticle {
        NewArticle {
            ticket_id: self.ticket_id,
            body: self.body,
            content_type: self
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            article_type: self
                .article_type
                .unwrap_or_else(|| DEFAULT_ARTICLE_TYPE.to_string()),
            internal: self.internal.unwrap_or(false),
            sender: self.sender.unwrap_or_else(|| DEFAULT_SENDER.to_string()),
            to: self.to,
            cc: self.cc,
            subject: self.subject,
            time_unit: self.time_unit,
        }
    }
}

/// Fully resolved request body for `POST /api/v1/ticket_articles`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewArticle {
    /// Ticket to attach the article to.
    pub ticket_id: u64,
    /// Article body.
    pub body: String,
    /// Body MIME type.
    pub content_type: String,
    /// Article type.
    #[serde(rename = "type")]
    pub article_type: String,
    /// Internal visibility flag.
    pub internal: bool,
    /// Sender.
    pub sender: String,
    /// To recipients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// CC recipients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Time accounting units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,
}
