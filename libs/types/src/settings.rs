//! Display settings shown on the shared screen

use serde::{Deserialize, Serialize};

/// Non-tally configuration for the shared display
///
/// Kept separate from the tally so viewers can distinguish "title changed"
/// from "tally changed" without redundant re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSettings {
    /// Title rendered above the live ranking
    pub event_title: String,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            event_title: "Live Program Voting".to_string(),
        }
    }
}
