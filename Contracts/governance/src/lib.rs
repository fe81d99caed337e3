#![no_std]
//! Governance
//!
//! Proposal registry of the governance system. Holders with enough
//! proposition power create proposals bound to one authorized timelock
//! executor; holders vote with the power they had when voting opened;
//! proposals that met quorum and vote differential are queued into their
//! executor and executed once the delay has elapsed. A guardian can cancel
//! any proposal that has not run, and anyone can cancel a proposal whose
//! creator no longer holds the proposition power it needed.
//!
//! Settings of the registry itself change through the owner, which is
//! normally one of the executors: a proposal on that executor whose action
//! targets this contract is applied here once the executor releases it.

mod error;
mod events;
mod state;
mod storage;
mod types;

use governance_interface::{action_hash, ExecutorClient, PowerKind, VoteTally, VotingPowerOracleClient};
use soroban_sdk::{
    contract, contractimpl, log, xdr::ToXdr, Address, Bytes, BytesN, Env, Symbol, TryFromVal,
    Val, Vec,
};

pub use crate::error::GovernanceError;
pub use crate::types::{Proposal, ProposalAction, ProposalState, Vote, VoteMessage};
use crate::{events::Events, storage::Storage};

/// Governance registry interface.
pub trait GovernanceTrait {
    /// Set up the registry. `owner` changes registry settings, `guardian` may
    /// cancel proposals, `strategy` answers power queries and `executors` are
    /// authorized from the start. Can only be called once.
    fn init(
        env: Env,
        owner: Address,
        guardian: Address,
        strategy: Address,
        voting_delay: u32,
        executors: Vec<Address>,
    ) -> Result<(), GovernanceError>;

    /// Register a proposal. The five action lists are parallel and must be
    /// non-empty and of equal length. Returns the new proposal id.
    #[allow(clippy::too_many_arguments)]
    fn create(
        env: Env,
        creator: Address,
        executor: Address,
        targets: Vec<Address>,
        values: Vec<i128>,
        signatures: Vec<Symbol>,
        calldatas: Vec<Vec<Val>>,
        with_delegatecalls: Vec<bool>,
        ipfs_hash: BytesN<32>,
    ) -> Result<u32, GovernanceError>;

    fn submit_vote(env: Env, voter: Address, proposal_id: u32, support: bool) -> Result<(), GovernanceError>;

    /// Bind (or clear) the ed25519 key allowed to sign votes for `voter`.
    fn set_vote_signer(env: Env, voter: Address, signer: Option<BytesN<32>>) -> Result<(), GovernanceError>;
    /// Bytes a vote signer signs for `submit_vote_by_signature`.
    fn get_vote_payload(
        env: Env,
        voter: Address,
        proposal_id: u32,
        support: bool,
        nonce: u64,
        deadline: u64,
    ) -> Bytes;
    /// Relay a vote signed off-chain by the voter's bound signer.
    ///
    /// `InvalidSignature` is returned only when `voter` has no bound signer.
    /// A signature that does not verify against the bound key traps inside
    /// the host's ed25519 check and aborts the invocation without a contract
    /// error code.
    fn submit_vote_by_signature(
        env: Env,
        voter: Address,
        proposal_id: u32,
        support: bool,
        nonce: u64,
        deadline: u64,
        signature: BytesN<64>,
    ) -> Result<(), GovernanceError>;

    fn queue(env: Env, caller: Address, proposal_id: u32) -> Result<(), GovernanceError>;
    fn execute(env: Env, caller: Address, proposal_id: u32) -> Result<(), GovernanceError>;
    fn cancel(env: Env, caller: Address, proposal_id: u32) -> Result<(), GovernanceError>;

    /// Give up the guardian role for good.
    fn abdicate(env: Env) -> Result<(), GovernanceError>;

    // Owner
    fn set_governance_strategy(env: Env, strategy: Address) -> Result<(), GovernanceError>;
    fn set_voting_delay(env: Env, voting_delay: u32) -> Result<(), GovernanceError>;
    fn authorize_executors(env: Env, executors: Vec<Address>) -> Result<(), GovernanceError>;
    fn unauthorize_executors(env: Env, executors: Vec<Address>) -> Result<(), GovernanceError>;
    fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), GovernanceError>;

    // Getters
    fn get_proposal(env: Env, proposal_id: u32) -> Result<Proposal, GovernanceError>;
    fn get_proposals_count(env: Env) -> u32;
    fn get_proposal_state(env: Env, proposal_id: u32) -> Result<ProposalState, GovernanceError>;
    fn get_vote_on_proposal(env: Env, proposal_id: u32, voter: Address) -> Option<Vote>;
    fn is_executor_authorized(env: Env, executor: Address) -> bool;
    fn get_voting_delay(env: Env) -> Result<u32, GovernanceError>;
    fn get_governance_strategy(env: Env) -> Result<Address, GovernanceError>;
    fn get_owner(env: Env) -> Result<Address, GovernanceError>;
    fn get_guardian(env: Env) -> Option<Address>;
    fn get_vote_nonce(env: Env, voter: Address) -> u64;
    fn get_vote_signer(env: Env, voter: Address) -> Option<BytesN<32>>;
}

#[contract]
pub struct Governance;

#[contractimpl]
impl GovernanceTrait for Governance {
    fn init(
        env: Env,
        owner: Address,
        guardian: Address,
        strategy: Address,
        voting_delay: u32,
        executors: Vec<Address>,
    ) -> Result<(), GovernanceError> {
        let store = Storage::new(&env);
        if store.is_initialized() {
            return Err(GovernanceError::AlreadyInitialized);
        }
        store.set_owner(&owner);
        store.set_guardian(&guardian);
        store.set_strategy(&strategy);
        store.set_voting_delay(voting_delay);
        for executor in executors.iter() {
            store.set_executor_authorized(&executor, true);
            Events::emit_executor_authorized(&env, &executor);
        }
        store.extend_instance();

        log!(&env, "governance initialized", owner, guardian, strategy, voting_delay);
        Ok(())
    }

    fn create(
        env: Env,
        creator: Address,
        executor: Address,
        targets: Vec<Address>,
        values: Vec<i128>,
        signatures: Vec<Symbol>,
        calldatas: Vec<Vec<Val>>,
        with_delegatecalls: Vec<bool>,
        ipfs_hash: BytesN<32>,
    ) -> Result<u32, GovernanceError> {
        let actions = ProposalAction::zip_all(
            &env,
            &targets,
            &values,
            &signatures,
            &calldatas,
            &with_delegatecalls,
        )?;

        let store = Storage::new(&env);
        if !store.is_executor_authorized(&executor) {
            return Err(GovernanceError::ExecutorNotAuthorized);
        }
        creator.require_auth();

        let strategy = store.strategy()?;
        let executor_client = ExecutorClient::new(&env, &executor);
        let ledger = env.ledger().sequence();
        if !executor_client.validate_creator_of_proposal(&strategy, &creator, &ledger.saturating_sub(1)) {
            return Err(GovernanceError::PropositionPowerTooLow);
        }

        let start_block = ledger
            .checked_add(store.voting_delay()?)
            .ok_or(GovernanceError::Overflow)?;
        let end_block = start_block
            .checked_add(executor_client.get_voting_duration())
            .ok_or(GovernanceError::Overflow)?;

        let proposal = Proposal {
            id: store.next_proposal_id()?,
            creator,
            executor,
            actions,
            start_block,
            end_block,
            execution_time: 0,
            for_votes: 0,
            against_votes: 0,
            executed: false,
            canceled: false,
            strategy,
            ipfs_hash,
        };
        store.save_proposal(&proposal);
        store.extend_instance();

        log!(&env, "proposal created", proposal.id, proposal.start_block, proposal.end_block);
        Events::emit_proposal_created(&env, &proposal);
        Ok(proposal.id)
    }

    fn submit_vote(env: Env, voter: Address, proposal_id: u32, support: bool) -> Result<(), GovernanceError> {
        voter.require_auth();
        cast_vote(&env, &voter, proposal_id, support)
    }

    fn set_vote_signer(env: Env, voter: Address, signer: Option<BytesN<32>>) -> Result<(), GovernanceError> {
        voter.require_auth();
        Storage::new(&env).set_vote_signer(&voter, signer.as_ref());
        Events::emit_vote_signer_changed(&env, &voter, signer);
        Ok(())
    }

    fn get_vote_payload(
        env: Env,
        voter: Address,
        proposal_id: u32,
        support: bool,
        nonce: u64,
        deadline: u64,
    ) -> Bytes {
        vote_payload(&env, voter, proposal_id, support, nonce, deadline)
    }

    fn submit_vote_by_signature(
        env: Env,
        voter: Address,
        proposal_id: u32,
        support: bool,
        nonce: u64,
        deadline: u64,
        signature: BytesN<64>,
    ) -> Result<(), GovernanceError> {
        let store = Storage::new(&env);
        let signer = store
            .vote_signer(&voter)
            .ok_or(GovernanceError::InvalidSignature)?;
        if env.ledger().timestamp() > deadline {
            return Err(GovernanceError::SignatureExpired);
        }
        if nonce != store.nonce(&voter) {
            return Err(GovernanceError::InvalidNonce);
        }

        // Traps the invocation when the signature does not verify.
        let payload = vote_payload(&env, voter.clone(), proposal_id, support, nonce, deadline);
        env.crypto().ed25519_verify(&signer, &payload, &signature);

        let next = nonce.checked_add(1).ok_or(GovernanceError::Overflow)?;
        store.set_nonce(&voter, next);
        cast_vote(&env, &voter, proposal_id, support)
    }

    fn queue(env: Env, caller: Address, proposal_id: u32) -> Result<(), GovernanceError> {
        caller.require_auth();
        let store = Storage::new(&env);
        let mut proposal = store.proposal(proposal_id)?;
        if proposal_state(&env, &proposal) != ProposalState::Succeeded {
            return Err(GovernanceError::InvalidStateForQueue);
        }

        let executor = ExecutorClient::new(&env, &proposal.executor);
        let delay = executor.get_delay();
        let execution_time = env
            .ledger()
            .timestamp()
            .checked_add(delay)
            .ok_or(GovernanceError::Overflow)?;

        // Reject collisions with the executor queue and within the proposal
        // before anything is queued.
        let mut hashes: Vec<BytesN<32>> = Vec::new(&env);
        for action in proposal.actions.iter() {
            let hash = action_hash(&env, &action.timelocked(execution_time));
            if hashes.contains(&hash) || executor.is_action_queued(&hash) {
                return Err(GovernanceError::DuplicatedAction);
            }
            hashes.push_back(hash);
        }

        for action in proposal.actions.iter() {
            executor.queue_transaction(
                &action.target,
                &action.value,
                &action.signature,
                &action.calldata,
                &execution_time,
                &action.mode.is_delegate(),
            );
        }

        proposal.execution_time = execution_time;
        store.save_proposal(&proposal);
        store.keep_proposal_for(proposal_id, delay.saturating_add(executor.get_grace_period()));

        log!(&env, "proposal queued", proposal_id, execution_time);
        Events::emit_proposal_queued(&env, proposal_id, execution_time, &caller);
        Ok(())
    }

    fn execute(env: Env, caller: Address, proposal_id: u32) -> Result<(), GovernanceError> {
        caller.require_auth();
        let store = Storage::new(&env);
        let mut proposal = store.proposal(proposal_id)?;
        if store.is_executing(proposal_id) {
            return Err(GovernanceError::ProposalExecuting);
        }
        if proposal_state(&env, &proposal) != ProposalState::Queued {
            return Err(GovernanceError::OnlyQueuedProposals);
        }
        if env.ledger().timestamp() < proposal.execution_time {
            return Err(GovernanceError::TimelockNotFinished);
        }

        let executor = ExecutorClient::new(&env, &proposal.executor);
        for action in proposal.actions.iter() {
            let hash = action_hash(&env, &action.timelocked(proposal.execution_time));
            if !executor.is_action_queued(&hash) {
                return Err(GovernanceError::ActionNotQueued);
            }
        }

        store.set_executing(proposal_id, true);
        let this = env.current_contract_address();
        for action in proposal.actions.iter() {
            executor.execute_transaction(
                &action.target,
                &action.value,
                &action.signature,
                &action.calldata,
                &proposal.execution_time,
                &action.mode.is_delegate(),
            );
            if action.target == this {
                run_local_action(&env, &store, &proposal, &action)?;
            }
        }

        proposal.executed = true;
        store.save_proposal(&proposal);
        store.set_executing(proposal_id, false);

        log!(&env, "proposal executed", proposal_id, caller.clone());
        Events::emit_proposal_executed(&env, proposal_id, &caller);
        Ok(())
    }

    fn cancel(env: Env, caller: Address, proposal_id: u32) -> Result<(), GovernanceError> {
        caller.require_auth();
        let store = Storage::new(&env);
        let mut proposal = store.proposal(proposal_id)?;
        match proposal_state(&env, &proposal) {
            ProposalState::Canceled
            | ProposalState::Expired
            | ProposalState::Executed => return Err(GovernanceError::OnlyBeforeExecuted),
            _ => {}
        }

        let executor = ExecutorClient::new(&env, &proposal.executor);
        let by_guardian = store.guardian().is_some_and(|guardian| guardian == caller);
        if !by_guardian {
            let ledger = env.ledger().sequence().saturating_sub(1);
            if !executor.validate_proposal_cancellation(&proposal.strategy, &proposal.creator, &ledger) {
                return Err(GovernanceError::CancellationInvalid);
            }
        }

        proposal.canceled = true;
        store.save_proposal(&proposal);
        for action in proposal.actions.iter() {
            executor.cancel_transaction(
                &action.target,
                &action.value,
                &action.signature,
                &action.calldata,
                &proposal.execution_time,
                &action.mode.is_delegate(),
            );
        }

        log!(&env, "proposal canceled", proposal_id, caller);
        Events::emit_proposal_canceled(&env, proposal_id);
        Ok(())
    }

    fn abdicate(env: Env) -> Result<(), GovernanceError> {
        let store = Storage::new(&env);
        let guardian = store.guardian().ok_or(GovernanceError::NoGuardian)?;
        guardian.require_auth();
        store.remove_guardian();

        log!(&env, "guardian abdicated", guardian.clone());
        Events::emit_guardian_abdicated(&env, &guardian);
        Ok(())
    }

    fn set_governance_strategy(env: Env, strategy: Address) -> Result<(), GovernanceError> {
        let owner = require_owner(&env)?;
        apply_strategy(&env, &strategy, &owner);
        Ok(())
    }

    fn set_voting_delay(env: Env, voting_delay: u32) -> Result<(), GovernanceError> {
        let owner = require_owner(&env)?;
        apply_voting_delay(&env, voting_delay, &owner);
        Ok(())
    }

    fn authorize_executors(env: Env, executors: Vec<Address>) -> Result<(), GovernanceError> {
        require_owner(&env)?;
        apply_executor_authorization(&env, &executors, true);
        Ok(())
    }

    fn unauthorize_executors(env: Env, executors: Vec<Address>) -> Result<(), GovernanceError> {
        require_owner(&env)?;
        apply_executor_authorization(&env, &executors, false);
        Ok(())
    }

    fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), GovernanceError> {
        let owner = require_owner(&env)?;
        apply_ownership(&env, &owner, &new_owner);
        Ok(())
    }

    fn get_proposal(env: Env, proposal_id: u32) -> Result<Proposal, GovernanceError> {
        Storage::new(&env).proposal(proposal_id)
    }

    fn get_proposals_count(env: Env) -> u32 {
        Storage::new(&env).proposal_count()
    }

    fn get_proposal_state(env: Env, proposal_id: u32) -> Result<ProposalState, GovernanceError> {
        let proposal = Storage::new(&env).proposal(proposal_id)?;
        Ok(proposal_state(&env, &proposal))
    }

    fn get_vote_on_proposal(env: Env, proposal_id: u32, voter: Address) -> Option<Vote> {
        Storage::new(&env).vote(proposal_id, &voter)
    }

    fn is_executor_authorized(env: Env, executor: Address) -> bool {
        Storage::new(&env).is_executor_authorized(&executor)
    }

    fn get_voting_delay(env: Env) -> Result<u32, GovernanceError> {
        Storage::new(&env).voting_delay()
    }

    fn get_governance_strategy(env: Env) -> Result<Address, GovernanceError> {
        Storage::new(&env).strategy()
    }

    fn get_owner(env: Env) -> Result<Address, GovernanceError> {
        Storage::new(&env).owner()
    }

    fn get_guardian(env: Env) -> Option<Address> {
        Storage::new(&env).guardian()
    }

    fn get_vote_nonce(env: Env, voter: Address) -> u64 {
        Storage::new(&env).nonce(&voter)
    }

    fn get_vote_signer(env: Env, voter: Address) -> Option<BytesN<32>> {
        Storage::new(&env).vote_signer(&voter)
    }
}

fn proposal_state(env: &Env, proposal: &Proposal) -> ProposalState {
    if let Some(open) = state::voting_state(proposal, env.ledger().sequence()) {
        return open;
    }

    let executor = ExecutorClient::new(env, &proposal.executor);
    // Total supply is taken at the same ledger as every voter's power.
    let passed = proposal.for_votes > proposal.against_votes && {
        let voting_supply = VotingPowerOracleClient::new(env, &proposal.strategy)
            .total_power_at(&proposal.start_block, &PowerKind::Voting);
        executor.is_proposal_passed(&VoteTally {
            for_votes: proposal.for_votes,
            against_votes: proposal.against_votes,
            voting_supply,
        })
    };
    let grace_period = if passed && proposal.execution_time != 0 {
        executor.get_grace_period()
    } else {
        0
    };
    state::settled_state(proposal, passed, env.ledger().timestamp(), grace_period)
}

fn cast_vote(env: &Env, voter: &Address, proposal_id: u32, support: bool) -> Result<(), GovernanceError> {
    let store = Storage::new(env);
    let mut proposal = store.proposal(proposal_id)?;
    if proposal_state(env, &proposal) != ProposalState::Active {
        return Err(GovernanceError::VotingClosed);
    }
    if store.vote(proposal_id, voter).is_some() {
        return Err(GovernanceError::VoteAlreadySubmitted);
    }

    let voting_power = VotingPowerOracleClient::new(env, &proposal.strategy).power_at(
        voter,
        &proposal.start_block,
        &PowerKind::Voting,
    );
    if support {
        proposal.for_votes = proposal
            .for_votes
            .checked_add(voting_power)
            .ok_or(GovernanceError::Overflow)?;
    } else {
        proposal.against_votes = proposal
            .against_votes
            .checked_add(voting_power)
            .ok_or(GovernanceError::Overflow)?;
    }

    store.save_vote(proposal_id, voter, &Vote { support, voting_power });
    store.save_proposal(&proposal);

    Events::emit_vote(env, proposal_id, voter, support, voting_power);
    Ok(())
}

fn vote_payload(
    env: &Env,
    voter: Address,
    proposal_id: u32,
    support: bool,
    nonce: u64,
    deadline: u64,
) -> Bytes {
    VoteMessage {
        governance: env.current_contract_address(),
        voter,
        proposal_id,
        support,
        nonce,
        deadline,
    }
    .to_xdr(env)
}

fn require_owner(env: &Env) -> Result<Address, GovernanceError> {
    let owner = Storage::new(env).owner()?;
    owner.require_auth();
    Ok(owner)
}

/// Apply an executed action addressed to this registry. Only proposals run
/// by the owner executor may change registry settings.
fn run_local_action(
    env: &Env,
    store: &Storage,
    proposal: &Proposal,
    action: &ProposalAction,
) -> Result<(), GovernanceError> {
    let owner = store.owner()?;
    if proposal.executor != owner {
        return Err(GovernanceError::LocalActionNotAuthorized);
    }
    if action.calldata.len() != 1 {
        return Err(GovernanceError::InvalidLocalArguments);
    }
    let arg = action
        .calldata
        .get(0)
        .ok_or(GovernanceError::InvalidLocalArguments)?;

    let signature = &action.signature;
    if *signature == Symbol::new(env, "set_voting_delay") {
        let delay = decode::<u32>(env, &arg)?;
        apply_voting_delay(env, delay, &owner);
    } else if *signature == Symbol::new(env, "set_governance_strategy") {
        let strategy = decode::<Address>(env, &arg)?;
        apply_strategy(env, &strategy, &owner);
    } else if *signature == Symbol::new(env, "authorize_executors") {
        let executors = decode::<Vec<Address>>(env, &arg)?;
        apply_executor_authorization(env, &executors, true);
    } else if *signature == Symbol::new(env, "unauthorize_executors") {
        let executors = decode::<Vec<Address>>(env, &arg)?;
        apply_executor_authorization(env, &executors, false);
    } else if *signature == Symbol::new(env, "transfer_ownership") {
        let new_owner = decode::<Address>(env, &arg)?;
        apply_ownership(env, &owner, &new_owner);
    } else {
        return Err(GovernanceError::UnsupportedLocalAction);
    }
    Ok(())
}

fn decode<T: TryFromVal<Env, Val>>(env: &Env, arg: &Val) -> Result<T, GovernanceError> {
    T::try_from_val(env, arg).map_err(|_| GovernanceError::InvalidLocalArguments)
}

fn apply_strategy(env: &Env, strategy: &Address, initiator: &Address) {
    Storage::new(env).set_strategy(strategy);
    log!(env, "governance strategy changed", strategy.clone());
    Events::emit_strategy_changed(env, strategy, initiator);
}

fn apply_voting_delay(env: &Env, voting_delay: u32, initiator: &Address) {
    Storage::new(env).set_voting_delay(voting_delay);
    log!(env, "voting delay changed", voting_delay);
    Events::emit_voting_delay_changed(env, voting_delay, initiator);
}

fn apply_executor_authorization(env: &Env, executors: &Vec<Address>, authorized: bool) {
    let store = Storage::new(env);
    for executor in executors.iter() {
        store.set_executor_authorized(&executor, authorized);
        if authorized {
            Events::emit_executor_authorized(env, &executor);
        } else {
            Events::emit_executor_unauthorized(env, &executor);
        }
    }
    store.extend_instance();
}

fn apply_ownership(env: &Env, previous_owner: &Address, new_owner: &Address) {
    Storage::new(env).set_owner(new_owner);
    log!(env, "ownership transferred", previous_owner.clone(), new_owner.clone());
    Events::emit_ownership_transferred(env, previous_owner, new_owner);
}
