//! Error types for the vote ledger
//!
//! Comprehensive error taxonomy using thiserror

use crate::ids::ProgramId;
use thiserror::Error;

/// Errors produced by vote operations
///
/// `DuplicateVote` is expected and frequent under real load; it is a
/// rejection, not a system fault. `InvalidRequest` is raised before any
/// storage is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("duplicate vote for this identity")]
    DuplicateVote,

    #[error("program not found: {0}")]
    ProgramNotFound(ProgramId),

    #[error("no vote found for this identity")]
    NoVoteFound,
}

impl VoteError {
    /// Stable machine-readable code surfaced in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            VoteError::InvalidRequest(_) => "InvalidRequest",
            VoteError::DuplicateVote => "DuplicateVote",
            VoteError::ProgramNotFound(_) => "EntityNotFound",
            VoteError::NoVoteFound => "NoVoteFound",
        }
    }
}
