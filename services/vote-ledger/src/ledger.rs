//! Vote Ledger
//!
//! Authoritative store of per-program tallies and the append-only log of
//! accepted (identity → program) decisions. Every mutation happens inside
//! one lock acquisition — the atomic unit — so a partially applied vote
//! (count incremented but record missing, or vice versa) is never
//! observable, under failure or under arbitrary interleaving.
//!
//! The hub is notified while the lock is held; channel sends are
//! non-blocking, so this costs nothing and keeps push order identical to
//! the ledger's serialization order.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use types::errors::VoteError;
use types::ids::ProgramId;
use types::program::Program;
use types::vote::{IdentityKey, VoteRecord, VoteStatus};

use crate::hub::BroadcastHub;

/// Everything the atomic unit protects
#[derive(Default)]
struct LedgerState {
    /// Tallies, keyed by id; BTreeMap for deterministic iteration
    programs: BTreeMap<ProgramId, Program>,
    /// Append-only log of accepted votes
    records: Vec<VoteRecord>,
    /// Uniqueness index: one vote per identity key
    by_identity: HashMap<IdentityKey, ProgramId>,
    /// Uniqueness index: one vote per user token when present
    by_token: HashMap<String, ProgramId>,
}

impl LedgerState {
    fn tally(&self) -> Vec<Program> {
        self.programs.values().cloned().collect()
    }

    fn next_program_id(&self) -> ProgramId {
        self.programs
            .keys()
            .next_back()
            .map(ProgramId::next)
            .unwrap_or_else(|| ProgramId::new(1))
    }
}

/// The vote ledger and reset coordinator
///
/// All shared mutable state of the voting core lives behind this type's
/// mutex; the broadcast hub and identity resolver never touch it directly.
pub struct VoteLedger {
    state: Mutex<LedgerState>,
    hub: Arc<BroadcastHub>,
}

impl VoteLedger {
    pub fn new(hub: Arc<BroadcastHub>) -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
            hub,
        }
    }

    /// Cast a vote: duplicate check, existence check, increment, record
    /// append — one atomic unit.
    ///
    /// Returns the full updated tally (consumers always render the complete
    /// ranking). Under concurrent calls sharing an identity, exactly one
    /// succeeds; the rest observe `DuplicateVote`.
    pub fn cast_vote(
        &self,
        program_id: ProgramId,
        identity_key: &IdentityKey,
        user_token: Option<&str>,
    ) -> Result<Vec<Program>, VoteError> {
        let mut state = self.state.lock();

        if state.by_identity.contains_key(identity_key) {
            return Err(VoteError::DuplicateVote);
        }
        if let Some(token) = user_token {
            if state.by_token.contains_key(token) {
                return Err(VoteError::DuplicateVote);
            }
        }

        let program = state
            .programs
            .get_mut(&program_id)
            .ok_or(VoteError::ProgramNotFound(program_id))?;
        program.votes += 1;

        state.records.push(VoteRecord {
            identity_key: identity_key.clone(),
            user_token: user_token.map(str::to_string),
            program_id,
            created_at: Utc::now(),
        });
        state.by_identity.insert(identity_key.clone(), program_id);
        if let Some(token) = user_token {
            state.by_token.insert(token.to_string(), program_id);
        }

        tracing::info!(%program_id, records = state.records.len(), "vote accepted");

        let tally = state.tally();
        self.hub.broadcast_tally(tally.clone());
        Ok(tally)
    }

    /// Remove the caller's own vote and decrement the program it targeted.
    ///
    /// The record is matched by identity key and/or user token; both are
    /// unique keys, so only the caller's record can ever match.
    pub fn revoke_vote(
        &self,
        identity_key: Option<&IdentityKey>,
        user_token: Option<&str>,
    ) -> Result<Vec<Program>, VoteError> {
        let mut state = self.state.lock();

        let position = state
            .records
            .iter()
            .position(|record| {
                identity_key.is_some_and(|key| &record.identity_key == key)
                    || user_token.is_some_and(|token| record.user_token.as_deref() == Some(token))
            })
            .ok_or(VoteError::NoVoteFound)?;

        let record = state.records.remove(position);
        state.by_identity.remove(&record.identity_key);
        if let Some(token) = &record.user_token {
            state.by_token.remove(token);
        }
        if let Some(program) = state.programs.get_mut(&record.program_id) {
            program.votes = program.votes.saturating_sub(1);
        }

        tracing::info!(program_id = %record.program_id, "vote revoked");

        let tally = state.tally();
        self.hub.broadcast_tally(tally.clone());
        Ok(tally)
    }

    /// Read-only lookup to resynchronize a client's local "have I voted"
    /// belief with server truth.
    pub fn vote_status(&self, identity_key: &IdentityKey, user_token: Option<&str>) -> VoteStatus {
        let state = self.state.lock();

        if let Some(program_id) = state.by_identity.get(identity_key) {
            return VoteStatus::voted(*program_id);
        }
        if let Some(program_id) = user_token.and_then(|token| state.by_token.get(token)) {
            return VoteStatus::voted(*program_id);
        }
        VoteStatus::not_voted()
    }

    /// Zero every tally and clear the vote log in one unit, then signal all
    /// voter clients to forget their local voted state.
    ///
    /// A stale record must never block a legitimate re-vote after reset.
    pub fn reset_all(&self) -> Vec<Program> {
        let mut state = self.state.lock();

        for program in state.programs.values_mut() {
            program.votes = 0;
        }
        let cleared = state.records.len();
        state.records.clear();
        state.by_identity.clear();
        state.by_token.clear();

        tracing::info!(cleared, "all tallies zeroed and vote log cleared");

        let tally = state.tally();
        self.hub.broadcast_tally(tally.clone());
        self.hub.broadcast_reset_signal();
        tally
    }

    /// Create a program with a zeroed tally; id is max existing + 1.
    pub fn create_program(&self, name: &str, category: &str) -> Result<Program, VoteError> {
        if name.trim().is_empty() {
            return Err(VoteError::InvalidRequest(
                "program name must not be empty".to_string(),
            ));
        }

        let mut state = self.state.lock();
        let id = state.next_program_id();
        let program = Program::new(id, name.trim(), category.trim());
        state.programs.insert(id, program.clone());

        tracing::info!(%id, name = %program.name, "program created");

        self.hub.broadcast_tally(state.tally());
        Ok(program)
    }

    /// Update a program's display fields; `votes` is the admin override
    /// that may arbitrarily overwrite the displayed count without touching
    /// the vote log.
    pub fn update_program(
        &self,
        program_id: ProgramId,
        name: &str,
        category: &str,
        votes: Option<u64>,
    ) -> Result<Program, VoteError> {
        if name.trim().is_empty() {
            return Err(VoteError::InvalidRequest(
                "program name must not be empty".to_string(),
            ));
        }

        let mut state = self.state.lock();
        let program = state
            .programs
            .get_mut(&program_id)
            .ok_or(VoteError::ProgramNotFound(program_id))?;

        program.name = name.trim().to_string();
        program.category = category.trim().to_string();
        if let Some(votes) = votes {
            program.votes = votes;
        }
        let updated = program.clone();

        if let Some(votes) = votes {
            tracing::warn!(%program_id, votes, "admin vote override applied");
        } else {
            tracing::info!(%program_id, "program updated");
        }

        self.hub.broadcast_tally(state.tally());
        Ok(updated)
    }

    /// Delete a program, cascading deletion of its vote records so the
    /// affected identities may vote again.
    pub fn delete_program(&self, program_id: ProgramId) -> Result<Vec<Program>, VoteError> {
        let mut state = self.state.lock();

        state
            .programs
            .remove(&program_id)
            .ok_or(VoteError::ProgramNotFound(program_id))?;
        state.records.retain(|record| record.program_id != program_id);
        state.by_identity.retain(|_, target| *target != program_id);
        state.by_token.retain(|_, target| *target != program_id);

        tracing::info!(%program_id, "program deleted, vote records cascaded");

        let tally = state.tally();
        self.hub.broadcast_tally(tally.clone());
        Ok(tally)
    }

    /// Snapshot of the full tally, ordered by program id.
    pub fn programs(&self) -> Vec<Program> {
        self.state.lock().tally()
    }

    /// Number of accepted votes currently in the log.
    pub fn record_count(&self) -> usize {
        self.state.lock().records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::events::BroadcastEvent;

    fn identity(label: &str) -> IdentityKey {
        IdentityKey::new(format!("fp_{label}_203.0.113.7_Mozilla/5.0"))
    }

    fn seeded_ledger() -> (VoteLedger, ProgramId, ProgramId) {
        let ledger = VoteLedger::new(Arc::new(BroadcastHub::new()));
        let first = ledger.create_program("Opening act", "dance").unwrap();
        let second = ledger.create_program("Duet", "vocal").unwrap();
        (ledger, first.id, second.id)
    }

    fn votes_for(tally: &[Program], id: ProgramId) -> u64 {
        tally.iter().find(|p| p.id == id).unwrap().votes
    }

    #[test]
    fn test_cast_vote_returns_full_tally() {
        let (ledger, first, second) = seeded_ledger();

        let tally = ledger.cast_vote(first, &identity("a"), None).unwrap();
        assert_eq!(tally.len(), 2);
        assert_eq!(votes_for(&tally, first), 1);
        assert_eq!(votes_for(&tally, second), 0);
        assert_eq!(ledger.record_count(), 1);
    }

    #[test]
    fn test_vote_lifecycle_scenario() {
        let (ledger, first, second) = seeded_ledger();

        // A votes for program 1.
        let tally = ledger.cast_vote(first, &identity("a"), None).unwrap();
        assert_eq!(votes_for(&tally, first), 1);

        // A tries program 2: rejected, tally unchanged.
        let err = ledger.cast_vote(second, &identity("a"), None).unwrap_err();
        assert_eq!(err, VoteError::DuplicateVote);
        let tally = ledger.programs();
        assert_eq!(votes_for(&tally, first), 1);
        assert_eq!(votes_for(&tally, second), 0);

        // B votes for program 2.
        let tally = ledger.cast_vote(second, &identity("b"), None).unwrap();
        assert_eq!(votes_for(&tally, first), 1);
        assert_eq!(votes_for(&tally, second), 1);

        // Reset zeroes everything and unblocks A.
        let tally = ledger.reset_all();
        assert!(tally.iter().all(|p| p.votes == 0));
        assert_eq!(ledger.record_count(), 0);
        assert!(ledger.cast_vote(first, &identity("a"), None).is_ok());
    }

    #[test]
    fn test_duplicate_user_token_rejected_across_devices() {
        let (ledger, first, _) = seeded_ledger();

        ledger
            .cast_vote(first, &identity("phone"), Some("user_1"))
            .unwrap();

        // Same stored token from a different device fingerprint.
        let err = ledger
            .cast_vote(first, &identity("laptop"), Some("user_1"))
            .unwrap_err();
        assert_eq!(err, VoteError::DuplicateVote);
        assert_eq!(ledger.record_count(), 1);
    }

    #[test]
    fn test_unknown_program_rejected_without_mutation() {
        let (ledger, _, _) = seeded_ledger();
        let missing = ProgramId::new(99);

        let err = ledger.cast_vote(missing, &identity("a"), None).unwrap_err();
        assert_eq!(err, VoteError::ProgramNotFound(missing));
        assert_eq!(ledger.record_count(), 0);
    }

    #[test]
    fn test_revoke_then_revote() {
        let (ledger, first, second) = seeded_ledger();

        ledger
            .cast_vote(first, &identity("a"), Some("user_a"))
            .unwrap();
        let tally = ledger.revoke_vote(Some(&identity("a")), None).unwrap();
        assert_eq!(votes_for(&tally, first), 0);
        assert_eq!(ledger.record_count(), 0);

        // The same identity can now vote again, for a different program.
        let tally = ledger
            .cast_vote(second, &identity("a"), Some("user_a"))
            .unwrap();
        assert_eq!(votes_for(&tally, second), 1);
    }

    #[test]
    fn test_revoke_by_token_only() {
        let (ledger, first, _) = seeded_ledger();

        ledger
            .cast_vote(first, &identity("a"), Some("user_a"))
            .unwrap();
        let tally = ledger.revoke_vote(None, Some("user_a")).unwrap();
        assert_eq!(votes_for(&tally, first), 0);
    }

    #[test]
    fn test_revoke_without_matching_record() {
        let (ledger, first, _) = seeded_ledger();
        ledger.cast_vote(first, &identity("a"), None).unwrap();

        let err = ledger
            .revoke_vote(Some(&identity("stranger")), Some("user_x"))
            .unwrap_err();
        assert_eq!(err, VoteError::NoVoteFound);
        assert_eq!(ledger.record_count(), 1, "other identities' votes untouched");
    }

    #[test]
    fn test_vote_status_reflects_server_truth() {
        let (ledger, first, _) = seeded_ledger();

        assert_eq!(
            ledger.vote_status(&identity("a"), Some("user_a")),
            VoteStatus::not_voted()
        );

        ledger
            .cast_vote(first, &identity("a"), Some("user_a"))
            .unwrap();
        assert_eq!(
            ledger.vote_status(&identity("a"), None),
            VoteStatus::voted(first)
        );
        // Token alone also resolves (e.g. same browser, changed network).
        assert_eq!(
            ledger.vote_status(&identity("other"), Some("user_a")),
            VoteStatus::voted(first)
        );

        ledger.reset_all();
        assert_eq!(
            ledger.vote_status(&identity("a"), Some("user_a")),
            VoteStatus::not_voted()
        );
    }

    #[test]
    fn test_create_program_assigns_sequential_ids() {
        let ledger = VoteLedger::new(Arc::new(BroadcastHub::new()));
        let a = ledger.create_program("First", "x").unwrap();
        let b = ledger.create_program("Second", "y").unwrap();
        assert_eq!(a.id, ProgramId::new(1));
        assert_eq!(b.id, ProgramId::new(2));

        // Ids never shrink after a deletion at the tail.
        ledger.delete_program(b.id).unwrap();
        let c = ledger.create_program("Third", "z").unwrap();
        assert_eq!(c.id, ProgramId::new(2));
    }

    #[test]
    fn test_create_program_rejects_blank_name() {
        let ledger = VoteLedger::new(Arc::new(BroadcastHub::new()));
        let err = ledger.create_program("   ", "dance").unwrap_err();
        assert!(matches!(err, VoteError::InvalidRequest(_)));
        assert!(ledger.programs().is_empty());
    }

    #[test]
    fn test_update_program_admin_override() {
        let (ledger, first, _) = seeded_ledger();

        let updated = ledger
            .update_program(first, "Grand finale", "dance", Some(100))
            .unwrap();
        assert_eq!(updated.name, "Grand finale");
        assert_eq!(updated.votes, 100);
        // The override deliberately does not touch the vote log.
        assert_eq!(ledger.record_count(), 0);
    }

    #[test]
    fn test_delete_program_cascades_records() {
        let (ledger, first, second) = seeded_ledger();

        ledger
            .cast_vote(first, &identity("a"), Some("user_a"))
            .unwrap();
        ledger.cast_vote(second, &identity("b"), None).unwrap();

        let tally = ledger.delete_program(first).unwrap();
        assert_eq!(tally.len(), 1);
        assert_eq!(ledger.record_count(), 1);

        // The cascaded identity is free to vote again.
        assert!(ledger
            .cast_vote(second, &identity("a"), Some("user_a"))
            .is_ok());
    }

    #[test]
    fn test_sum_of_counts_matches_record_count() {
        let (ledger, first, second) = seeded_ledger();

        for i in 0..10 {
            let target = if i % 2 == 0 { first } else { second };
            ledger
                .cast_vote(target, &identity(&format!("v{i}")), None)
                .unwrap();
        }

        let total: u64 = ledger.programs().iter().map(|p| p.votes).sum();
        assert_eq!(total, ledger.record_count() as u64);
    }

    #[test]
    fn test_mutations_notify_the_hub() {
        let hub = Arc::new(BroadcastHub::new());
        let ledger = VoteLedger::new(hub.clone());
        let program = ledger.create_program("Solo", "vocal").unwrap();

        let (_id, mut rx) = hub.register();
        ledger.cast_vote(program.id, &identity("a"), None).unwrap();

        match rx.try_recv().unwrap() {
            BroadcastEvent::TallyUpdate { programs } => {
                assert_eq!(programs[0].votes, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        ledger.reset_all();
        assert!(matches!(
            rx.try_recv().unwrap(),
            BroadcastEvent::TallyUpdate { .. }
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            BroadcastEvent::ResetVotedStatus
        ));
    }
}
