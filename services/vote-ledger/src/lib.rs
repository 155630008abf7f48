//! Vote Ledger Engine
//!
//! The authoritative core of the live-event voting backend:
//! - One vote per identity, enforced by an atomic check-and-increment
//! - An append-only log of accepted (identity → program) decisions
//! - Full-tally fanout to every connected viewer after each mutation
//! - Administrative reset that re-opens voting in one atomic unit
//!
//! # Architecture
//!
//! ```text
//! vote request
//!      │
//! ┌────▼──────────┐
//! │IdentityResolver│  ← folds client + transport signals into one key
//! └────┬──────────┘
//!      │
//! ┌────▼─────┐
//! │VoteLedger│  ← atomic duplicate check + increment + record append
//! └────┬─────┘
//!      │ full tally
//! ┌────▼───────┐
//! │BroadcastHub│  ← pushes to every registered session
//! └────────────┘
//! ```
//!
//! The gateway owns the HTTP/WebSocket surface; this crate owns the
//! invariants.

pub mod hub;
pub mod identity;
pub mod ledger;

pub use hub::BroadcastHub;
pub use identity::{CompositeResolver, IdentityResolver, VoterIdentity};
pub use ledger::VoteLedger;
