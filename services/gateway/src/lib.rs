//! Gateway service for the live-event voting backend
//!
//! Exposes the vote ledger over HTTP and fans tally updates out to
//! connected viewers over WebSocket. All invariants live in the
//! `vote-ledger` crate; this crate is the transport surface: routing,
//! extraction of transport identity signals, admin auth, and error
//! mapping.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod settings;
pub mod state;
