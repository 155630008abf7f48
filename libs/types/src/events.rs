//! Push events carried over the broadcast channel
//!
//! Defines the `BroadcastEvent` enum: every message a connected viewer or
//! voter client can receive. Tally events carry the complete program list
//! rather than deltas; a viewer that misses one message is healed by the
//! next, and a fresh connection is healed by `Init`.

use crate::program::Program;
use crate::settings::EventSettings;
use serde::{Deserialize, Serialize};

/// An event pushed to every registered broadcast session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BroadcastEvent {
    /// Sent once at registration so a new viewer renders immediately
    Init { programs: Vec<Program> },

    /// Full tally after any successful mutating operation
    TallyUpdate { programs: Vec<Program> },

    /// Non-tally configuration changed (e.g. display title)
    SettingsUpdate { settings: EventSettings },

    /// Tells voter clients to forget their local "already voted" memory
    ResetVotedStatus,
}

impl BroadcastEvent {
    /// Get the event type as a string label for logging.
    pub fn event_label(&self) -> &'static str {
        match self {
            BroadcastEvent::Init { .. } => "init",
            BroadcastEvent::TallyUpdate { .. } => "tally_update",
            BroadcastEvent::SettingsUpdate { .. } => "settings_update",
            BroadcastEvent::ResetVotedStatus => "reset_voted_status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProgramId;

    #[test]
    fn test_event_tagging() {
        let event = BroadcastEvent::TallyUpdate {
            programs: vec![Program::new(ProgramId::new(1), "Solo", "vocal")],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.starts_with(r#"{"type":"tally_update""#));
    }

    #[test]
    fn test_reset_signal_has_no_payload() {
        let json = serde_json::to_string(&BroadcastEvent::ResetVotedStatus).unwrap();
        assert_eq!(json, r#"{"type":"reset_voted_status"}"#);
    }

    #[test]
    fn test_event_serialization_roundtrip() {
        let event = BroadcastEvent::SettingsUpdate {
            settings: EventSettings {
                event_title: "Finals".to_string(),
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: BroadcastEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }

    #[test]
    fn test_event_label() {
        assert_eq!(
            BroadcastEvent::Init { programs: vec![] }.event_label(),
            "init"
        );
        assert_eq!(BroadcastEvent::ResetVotedStatus.event_label(), "reset_voted_status");
    }
}
