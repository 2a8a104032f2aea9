//! Ticket state catalog model.

use serde::{Deserialize, Serialize};

/// A ticket state such as "new", "open" or "closed".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketState {
    /// Unique state ID.
    pub id: u64,

    /// State type reference.
    #[serde(default)]
    pub state_type_id: Option<u64>,

    /// State name.
    #[serde(default)]
    pub name: String,

    /// State that follows this one (e.g., after a pending reminder).
    #[serde(default)]
    pub next_state_id: Option<u64>,

    /// Whether escalation is suspended while in this state.
    #[serde(default)]
    pub ignore_escalation: bool,

    /// Whether new tickets start in this state.
    #[serde(default)]
    pub default_create: bool,

    /// Whether follow-ups move tickets to this state.
    #[serde(default)]
    pub default_follow_up: bool,

    /// Whether the state is selectable.
    #[serde(default)]
    pub active: bool,

    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_state_deserialize() {
        let json = r#"[
            {"id": 1, "state_type_id": 1, "name": "new", "next_state_id": null,
             "ignore_escalation": false, "default_create": true,
             "default_follow_up": false, "active": true, "note": null},
            {"id": 3, "name": "pending reminder", "next_state_id": 2,
             "ignore_escalation": true}
        ]"#;
        let states: Vec<TicketState> = serde_json::from_str(json).unwrap();
        assert_eq!(states.len(), 2);
        assert!(states[0].default_create);
        assert_eq!(states[1].next_state_id, Some(2));
        assert!(states[1].ignore_escalation);
    }
}
