//! Competing program entries
//!
//! A `Program` is one item on the ballot: a display name, a category label
//! for grouping on the shared screen, and its running vote count. The count
//! is mutated only by the vote ledger (atomic increment/decrement) and by
//! the admin override on the edit endpoint.

use crate::ids::ProgramId;
use serde::{Deserialize, Serialize};

/// A competing entry that accumulates votes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Stable identifier assigned at creation
    pub id: ProgramId,
    /// Display name shown to voters and on the shared screen
    pub name: String,
    /// Category label for grouping (e.g. dance, vocal)
    pub category: String,
    /// Running vote count, non-negative
    pub votes: u64,
}

impl Program {
    /// Create a new program with a zeroed tally
    pub fn new(id: ProgramId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            votes: 0,
        }
    }
}
