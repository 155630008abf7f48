//! Unique identifier types for voting entities
//!
//! Program IDs are small sequential integers assigned by the ledger at
//! creation time, so the admin screen and the stress tooling can refer to
//! entries by a stable, human-readable number. Session IDs use UUID v7 for
//! time-sortable ordering of connection lifetimes in logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a competing program
///
/// Assigned at creation as `max existing id + 1`; stable for the lifetime
/// of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(u64);

impl ProgramId {
    /// Create from a raw numeric id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric id
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id assigned after this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProgramId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a broadcast session
///
/// Uses UUID v7 so connection lifetimes sort chronologically in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new SessionId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
