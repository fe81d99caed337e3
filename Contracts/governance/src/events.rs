use soroban_sdk::{contractevent, Address, BytesN, Env, Vec};

use crate::types::{Proposal, ProposalAction};

#[contractevent]
pub struct ProposalCreated {
    #[topic]
    pub id: u32,
    #[topic]
    pub creator: Address,
    pub executor: Address,
    pub actions: Vec<ProposalAction>,
    pub start_block: u32,
    pub end_block: u32,
    pub strategy: Address,
    pub ipfs_hash: BytesN<32>,
}

#[contractevent]
pub struct VoteEmitted {
    #[topic]
    pub id: u32,
    #[topic]
    pub voter: Address,
    pub support: bool,
    pub voting_power: i128,
}

#[contractevent]
pub struct ProposalQueued {
    #[topic]
    pub id: u32,
    pub execution_time: u64,
    pub initiator_queueing: Address,
}

#[contractevent]
pub struct ProposalExecuted {
    #[topic]
    pub id: u32,
    pub initiator_execution: Address,
}

#[contractevent]
pub struct ProposalCanceled {
    #[topic]
    pub id: u32,
}

#[contractevent]
pub struct GovernanceStrategyChanged {
    pub new_strategy: Address,
    pub initiator_change: Address,
}

#[contractevent]
pub struct VotingDelayChanged {
    pub new_voting_delay: u32,
    pub initiator_change: Address,
}

#[contractevent]
pub struct ExecutorAuthorized {
    #[topic]
    pub executor: Address,
}

#[contractevent]
pub struct ExecutorUnauthorized {
    #[topic]
    pub executor: Address,
}

#[contractevent]
pub struct GuardianAbdicated {
    pub guardian: Address,
}

#[contractevent]
pub struct OwnershipTransferred {
    #[topic]
    pub previous_owner: Address,
    #[topic]
    pub new_owner: Address,
}

#[contractevent]
pub struct VoteSignerChanged {
    #[topic]
    pub voter: Address,
    pub signer: Option<BytesN<32>>,
}

pub struct Events;

impl Events {
    pub fn emit_proposal_created(env: &Env, proposal: &Proposal) {
        ProposalCreated {
            id: proposal.id,
            creator: proposal.creator.clone(),
            executor: proposal.executor.clone(),
            actions: proposal.actions.clone(),
            start_block: proposal.start_block,
            end_block: proposal.end_block,
            strategy: proposal.strategy.clone(),
            ipfs_hash: proposal.ipfs_hash.clone(),
        }
        .publish(env);
    }

    pub fn emit_vote(env: &Env, id: u32, voter: &Address, support: bool, voting_power: i128) {
        VoteEmitted {
            id,
            voter: voter.clone(),
            support,
            voting_power,
        }
        .publish(env);
    }

    pub fn emit_proposal_queued(env: &Env, id: u32, execution_time: u64, caller: &Address) {
        ProposalQueued {
            id,
            execution_time,
            initiator_queueing: caller.clone(),
        }
        .publish(env);
    }

    pub fn emit_proposal_executed(env: &Env, id: u32, caller: &Address) {
        ProposalExecuted {
            id,
            initiator_execution: caller.clone(),
        }
        .publish(env);
    }

    pub fn emit_proposal_canceled(env: &Env, id: u32) {
        ProposalCanceled { id }.publish(env);
    }

    pub fn emit_strategy_changed(env: &Env, new_strategy: &Address, initiator: &Address) {
        GovernanceStrategyChanged {
            new_strategy: new_strategy.clone(),
            initiator_change: initiator.clone(),
        }
        .publish(env);
    }

    pub fn emit_voting_delay_changed(env: &Env, new_voting_delay: u32, initiator: &Address) {
        VotingDelayChanged {
            new_voting_delay,
            initiator_change: initiator.clone(),
        }
        .publish(env);
    }

    pub fn emit_executor_authorized(env: &Env, executor: &Address) {
        ExecutorAuthorized {
            executor: executor.clone(),
        }
        .publish(env);
    }

    pub fn emit_executor_unauthorized(env: &Env, executor: &Address) {
        ExecutorUnauthorized {
            executor: executor.clone(),
        }
        .publish(env);
    }

    pub fn emit_guardian_abdicated(env: &Env, guardian: &Address) {
        GuardianAbdicated {
            guardian: guardian.clone(),
        }
        .publish(env);
    }

    pub fn emit_ownership_transferred(env: &Env, previous_owner: &Address, new_owner: &Address) {
        OwnershipTransferred {
            previous_owner: previous_owner.clone(),
            new_owner: new_owner.clone(),
        }
        .publish(env);
    }

    pub fn emit_vote_signer_changed(env: &Env, voter: &Address, signer: Option<BytesN<32>>) {
        VoteSignerChanged {
            voter: voter.clone(),
            signer,
        }
        .publish(env);
    }
}
