//! Identity keys, vote records, and status lookups
//!
//! The identity key is the deduplication fingerprint derived from client and
//! transport signals. It is opaque to everything except the resolver that
//! produced it; the ledger only ever uses it for equality.

use crate::ids::ProgramId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deduplication key derived from client + transport signals
///
/// Not cryptographically strong identity. The composite exists because any
/// single signal is spoofable or shared (many phones behind one NAT share
/// an origin address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One accepted vote: an append-only log entry binding an identity to a
/// program
///
/// Invariant: no other record shares this record's identity key, and no
/// other record shares its user token when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// Unique deduplication key
    pub identity_key: IdentityKey,
    /// Secondary dedup key from client-side storage, unique when present
    pub user_token: Option<String>,
    /// The program this identity voted for
    pub program_id: ProgramId,
    /// When the vote was accepted
    pub created_at: DateTime<Utc>,
}

/// Result of a read-only "have I voted" lookup
///
/// Used to resynchronize a client's local belief with server truth after an
/// administrative reset invalidated its local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteStatus {
    pub has_voted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<ProgramId>,
}

impl VoteStatus {
    /// Status for an identity with no recorded vote
    pub fn not_voted() -> Self {
        Self {
            has_voted: false,
            program_id: None,
        }
    }

    /// Status for an identity that voted for `program_id`
    pub fn voted(program_id: ProgramId) -> Self {
        Self {
            has_voted: true,
            program_id: Some(program_id),
        }
    }
}
