use governance_interface::{InvocationMode, TimelockAction};
use soroban_sdk::{contracttype, Address, BytesN, Env, Symbol, Val, Vec};

use crate::error::GovernanceError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalAction {
    pub target: Address,
    pub value: i128,
    pub signature: Symbol,
    pub calldata: Vec<Val>,
    pub mode: InvocationMode,
}

impl ProposalAction {
    /// Zip the parallel argument lists of `create` into actions.
    pub fn zip_all(
        env: &Env,
        targets: &Vec<Address>,
        values: &Vec<i128>,
        signatures: &Vec<Symbol>,
        calldatas: &Vec<Vec<Val>>,
        with_delegatecalls: &Vec<bool>,
    ) -> Result<Vec<ProposalAction>, GovernanceError> {
        let len = targets.len();
        if len == 0 {
            return Err(GovernanceError::EmptyTargets);
        }
        if values.len() != len
            || signatures.len() != len
            || calldatas.len() != len
            || with_delegatecalls.len() != len
        {
            return Err(GovernanceError::InconsistentParams);
        }
        if values.iter().any(|value| value < 0) {
            return Err(GovernanceError::InvalidValue);
        }

        let mut actions = Vec::new(env);
        for i in 0..len {
            let action = ProposalAction {
                target: targets.get(i).ok_or(GovernanceError::InconsistentParams)?,
                value: values.get(i).ok_or(GovernanceError::InconsistentParams)?,
                signature: signatures.get(i).ok_or(GovernanceError::InconsistentParams)?,
                calldata: calldatas.get(i).ok_or(GovernanceError::InconsistentParams)?,
                mode: InvocationMode::from_flag(
                    with_delegatecalls.get(i).ok_or(GovernanceError::InconsistentParams)?,
                ),
            };
            actions.push_back(action);
        }
        Ok(actions)
    }

    /// The executor queue entry for this action at `execution_time`.
    pub fn timelocked(&self, execution_time: u64) -> TimelockAction {
        TimelockAction {
            target: self.target.clone(),
            value: self.value,
            signature: self.signature.clone(),
            calldata: self.calldata.clone(),
            execution_time,
            with_delegatecall: self.mode.is_delegate(),
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u32,
    pub creator: Address,
    pub executor: Address,
    pub actions: Vec<ProposalAction>,
    pub start_block: u32,
    pub end_block: u32,
    /// Zero until the proposal is queued.
    pub execution_time: u64,
    pub for_votes: i128,
    pub against_votes: i128,
    pub executed: bool,
    pub canceled: bool,
    pub strategy: Address,
    pub ipfs_hash: BytesN<32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vote {
    pub support: bool,
    pub voting_power: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalState {
    Pending,
    Canceled,
    Active,
    Failed,
    Succeeded,
    Queued,
    Expired,
    Executed,
}

/// The message an off-chain signer authorizes for `submit_vote_by_signature`.
/// Its XDR encoding is what gets signed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteMessage {
    pub governance: Address,
    pub voter: Address,
    pub proposal_id: u32,
    pub support: bool,
    pub nonce: u64,
    pub deadline: u64,
}
