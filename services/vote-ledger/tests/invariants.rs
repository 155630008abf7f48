//! Ledger invariants under arbitrary operation sequences
//!
//! Property-based checks: whatever mix of casts, revokes, and resets is
//! applied, the sum of displayed counts equals the number of records in
//! the log, and no identity ever holds more than one live vote.

use std::sync::Arc;

use proptest::prelude::*;
use types::errors::VoteError;
use types::ids::ProgramId;
use types::vote::IdentityKey;
use vote_ledger::{BroadcastHub, VoteLedger};

#[derive(Debug, Clone)]
enum Op {
    Cast { voter: u8, program: u8 },
    Revoke { voter: u8 },
    Reset,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (0u8..20, 0u8..3).prop_map(|(voter, program)| Op::Cast { voter, program }),
        2 => (0u8..20).prop_map(|voter| Op::Revoke { voter }),
        1 => Just(Op::Reset),
    ]
}

fn key_for(voter: u8) -> IdentityKey {
    IdentityKey::new(format!("fp_{voter}_203.0.113.7_Mozilla/5.0"))
}

proptest! {
    #[test]
    fn sum_of_counts_always_equals_record_count(ops in prop::collection::vec(op_strategy(), 1..120)) {
        let ledger = VoteLedger::new(Arc::new(BroadcastHub::new()));
        for i in 0..3 {
            ledger.create_program(&format!("Program {}", i + 1), "stage").unwrap();
        }

        for op in ops {
            match op {
                Op::Cast { voter, program } => {
                    let result = ledger.cast_vote(
                        ProgramId::new(u64::from(program) + 1),
                        &key_for(voter),
                        None,
                    );
                    // Only these two outcomes are legal for a seeded program.
                    prop_assert!(matches!(result, Ok(_) | Err(VoteError::DuplicateVote)));
                }
                Op::Revoke { voter } => {
                    let _ = ledger.revoke_vote(Some(&key_for(voter)), None);
                }
                Op::Reset => {
                    ledger.reset_all();
                }
            }

            let total: u64 = ledger.programs().iter().map(|p| p.votes).sum();
            prop_assert_eq!(total, ledger.record_count() as u64);
        }
    }

    #[test]
    fn a_voter_never_counts_twice(casts in prop::collection::vec((0u8..10, 0u8..3), 1..80)) {
        let ledger = VoteLedger::new(Arc::new(BroadcastHub::new()));
        for i in 0..3 {
            ledger.create_program(&format!("Program {}", i + 1), "stage").unwrap();
        }

        let mut seen = std::collections::HashSet::new();
        for (voter, program) in casts {
            let result = ledger.cast_vote(
                ProgramId::new(u64::from(program) + 1),
                &key_for(voter),
                None,
            );
            if seen.insert(voter) {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result.unwrap_err(), VoteError::DuplicateVote);
            }
        }

        prop_assert_eq!(ledger.record_count(), seen.len());
    }
}
