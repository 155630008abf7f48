//! Broadcast Hub
//!
//! Process-wide registry of live viewer/voter sessions. Every ledger
//! mutation pushes the complete tally to all of them; full-state
//! replacement (not deltas) keeps the protocol self-healing against any
//! single missed message. Sessions are ephemeral: registered on connect,
//! dropped on disconnect or on the first failed push.

use dashmap::DashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use types::events::BroadcastEvent;
use types::ids::SessionId;
use types::program::Program;
use types::settings::EventSettings;

/// Registry of currently connected broadcast sessions
///
/// `register`/`unregister`/broadcast are its only mutators. Sends are
/// non-blocking channel writes, so callers may broadcast while holding
/// ledger locks.
#[derive(Default)]
pub struct BroadcastHub {
    sessions: DashMap<SessionId, UnboundedSender<BroadcastEvent>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Register a new session. Returns its id and the receiving end the
    /// transport loop drains into the socket.
    pub fn register(&self) -> (SessionId, UnboundedReceiver<BroadcastEvent>) {
        let session_id = SessionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        self.sessions.insert(session_id, tx);
        tracing::debug!(%session_id, sessions = self.sessions.len(), "session registered");
        (session_id, rx)
    }

    /// Remove a session (disconnect).
    pub fn unregister(&self, session_id: SessionId) {
        if self.sessions.remove(&session_id).is_some() {
            tracing::debug!(%session_id, sessions = self.sessions.len(), "session unregistered");
        }
    }

    /// Send the complete current state to one newly connected session so it
    /// does not wait for the next vote to render anything.
    pub fn push_full_state(&self, session_id: SessionId, programs: Vec<Program>) {
        let delivered = self
            .sessions
            .get(&session_id)
            .map(|tx| tx.send(BroadcastEvent::Init { programs }).is_ok())
            .unwrap_or(false);
        if !delivered {
            self.sessions.remove(&session_id);
            tracing::warn!(%session_id, "failed to push full state, session dropped");
        }
    }

    /// Push the complete tally to every registered session.
    pub fn broadcast_tally(&self, programs: Vec<Program>) {
        self.broadcast(BroadcastEvent::TallyUpdate { programs });
    }

    /// Tell viewers the non-tally display configuration changed.
    pub fn broadcast_settings_change(&self, settings: EventSettings) {
        self.broadcast(BroadcastEvent::SettingsUpdate { settings });
    }

    /// Tell every voter client to forget its local "already voted" memory.
    pub fn broadcast_reset_signal(&self) {
        self.broadcast(BroadcastEvent::ResetVotedStatus);
    }

    /// Number of currently registered sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Fan an event out to all sessions. A failed push never propagates to
    /// the mutating operation; the dead session is logged and removed.
    fn broadcast(&self, event: BroadcastEvent) {
        let mut dead = Vec::new();
        for entry in self.sessions.iter() {
            if entry.value().send(event.clone()).is_err() {
                dead.push(*entry.key());
            }
        }
        for session_id in dead {
            self.sessions.remove(&session_id);
            tracing::warn!(%session_id, event = event.event_label(), "push failed, session dropped");
        }
        tracing::debug!(
            event = event.event_label(),
            sessions = self.sessions.len(),
            "broadcast delivered"
        );
    }
}
