//! Proposal state derivation.
//!
//! State is never stored. It is recomputed from the persisted proposal, the
//! current ledger and time, and the executor's verdict on the final tally.
//! The verdict is only needed once voting has closed, so derivation runs in
//! two steps: [`voting_state`] answers from the proposal alone while the vote
//! is open, and [`settled_state`] finishes the job with the verdict.

use crate::types::{Proposal, ProposalState};

/// State of `proposal` while it is canceled, pending or open for votes.
/// `None` once the voting window has closed.
pub fn voting_state(proposal: &Proposal, ledger: u32) -> Option<ProposalState> {
    if proposal.canceled {
        Some(ProposalState::Canceled)
    } else if ledger < proposal.start_block {
        Some(ProposalState::Pending)
    } else if ledger <= proposal.end_block {
        Some(ProposalState::Active)
    } else {
        None
    }
}

/// State of a closed, non-canceled proposal given whether its tally passed.
pub fn settled_state(proposal: &Proposal, passed: bool, now: u64, grace_period: u64) -> ProposalState {
    if !passed {
        ProposalState::Failed
    } else if proposal.execution_time == 0 {
        ProposalState::Succeeded
    } else if proposal.executed {
        ProposalState::Executed
    } else if now > proposal.execution_time.saturating_add(grace_period) {
        ProposalState::Expired
    } else {
        ProposalState::Queued
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, BytesN, Env, Vec};

    fn proposal(env: &Env) -> Proposal {
        Proposal {
            id: 0,
            creator: Address::generate(env),
            executor: Address::generate(env),
            actions: Vec::new(env),
            start_block: 100,
            end_block: 110,
            execution_time: 0,
            for_votes: 0,
            against_votes: 0,
            executed: false,
            canceled: false,
            strategy: Address::generate(env),
            ipfs_hash: BytesN::from_array(env, &[0; 32]),
        }
    }

    #[test]
    fn test_voting_window_bounds() {
        let env = Env::default();
        let p = proposal(&env);
        assert_eq!(voting_state(&p, 99), Some(ProposalState::Pending));
        assert_eq!(voting_state(&p, 100), Some(ProposalState::Active));
        assert_eq!(voting_state(&p, 110), Some(ProposalState::Active));
        assert_eq!(voting_state(&p, 111), None);
    }

    #[test]
    fn test_canceled_wins_over_window() {
        let env = Env::default();
        let mut p = proposal(&env);
        p.canceled = true;
        assert_eq!(voting_state(&p, 50), Some(ProposalState::Canceled));
        assert_eq!(voting_state(&p, 500), Some(ProposalState::Canceled));
    }

    #[test]
    fn test_settled_progression() {
        let env = Env::default();
        let mut p = proposal(&env);
        assert_eq!(settled_state(&p, false, 0, 10), ProposalState::Failed);
        assert_eq!(settled_state(&p, true, 0, 10), ProposalState::Succeeded);

        p.execution_time = 1_000;
        assert_eq!(settled_state(&p, true, 999, 10), ProposalState::Queued);
        assert_eq!(settled_state(&p, true, 1_010, 10), ProposalState::Queued);
        assert_eq!(settled_state(&p, true, 1_011, 10), ProposalState::Expired);

        p.executed = true;
        assert_eq!(settled_state(&p, true, 5_000, 10), ProposalState::Executed);
    }
}
