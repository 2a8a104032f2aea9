//! User models for the Zammad API.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Zammad user (agent or customer).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique user ID.
    pub id: u64,

    /// Organization reference.
    #[serde(default)]
    pub organization_id: Option<u64>,

    /// Login name.
    #[serde(default)]
    pub login: String,

    /// First name.
    #[serde(default)]
    pub firstname: String,

    /// Last name.
    #[serde(default)]
    pub lastname: String,

    /// Email address.
    #[serde(default)]
    pub email: String,

    /// Whether the account is active.
    #[serde(default)]
    pub active: bool,

    /// Whether the user is flagged as VIP.
    #[serde(default)]
    pub vip: bool,

    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,

    /// Last login time.
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,

    /// Role references.
    #[serde(default)]
    pub role_ids: Vec<u64>,

    /// Group access map: group ID to access levels.
    #[serde(default)]
    pub group_ids: HashMap<String, Vec<String>>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Returns "First Last", falling back to the login, then the email.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.firstname, self.lastname);
        let full = full.trim();
        if !full.is_empty() {
            full.to_string()
        } else if !self.login.is_empty() {
            self.login.clone()
        } else {
            self.email.clone()
        }
    }
}
