use soroban_sdk::{contracttype, Address, BytesN, Env};
use crate::{
    error::GovernanceError,
    types::{Proposal, Vote},
};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const RECORD_BUMP_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub(crate) const RECORD_LIFETIME_THRESHOLD: u32 = RECORD_BUMP_AMOUNT - 7 * DAY_IN_LEDGERS;
pub(crate) const LEDGER_CLOSE_SECONDS: u64 = 5;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Guardian,
    Strategy,
    VotingDelay,
    ProposalCount,
    Executor(Address),
    Proposal(u32),
    Vote(u32, Address),
    Nonce(Address),
    VoteSigner(Address),
    Executing(u32),
}

pub struct Storage<'a> {
    env: &'a Env,
}

impl<'a> Storage<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    pub fn is_initialized(&self) -> bool {
        self.env.storage().instance().has(&DataKey::Owner)
    }

    pub fn extend_instance(&self) {
        self.env
            .storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    // Parameters

    pub fn owner(&self) -> Result<Address, GovernanceError> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(GovernanceError::NotInitialized)
    }

    pub fn set_owner(&self, owner: &Address) {
        self.env.storage().instance().set(&DataKey::Owner, owner);
    }

    pub fn guardian(&self) -> Option<Address> {
        self.env.storage().instance().get(&DataKey::Guardian)
    }

    pub fn set_guardian(&self, guardian: &Address) {
        self.env.storage().instance().set(&DataKey::Guardian, guardian);
    }

    pub fn remove_guardian(&self) {
        self.env.storage().instance().remove(&DataKey::Guardian);
    }

    pub fn strategy(&self) -> Result<Address, GovernanceError> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::Strategy)
            .ok_or(GovernanceError::NotInitialized)
    }

    pub fn set_strategy(&self, strategy: &Address) {
        self.env.storage().instance().set(&DataKey::Strategy, strategy);
    }

    pub fn voting_delay(&self) -> Result<u32, GovernanceError> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::VotingDelay)
            .ok_or(GovernanceError::NotInitialized)
    }

    pub fn set_voting_delay(&self, delay: u32) {
        self.env.storage().instance().set(&DataKey::VotingDelay, &delay);
    }

    pub fn is_executor_authorized(&self, executor: &Address) -> bool {
        self.env
            .storage()
            .instance()
            .get(&DataKey::Executor(executor.clone()))
            .unwrap_or(false)
    }

    pub fn set_executor_authorized(&self, executor: &Address, authorized: bool) {
        let key = DataKey::Executor(executor.clone());
        if authorized {
            self.env.storage().instance().set(&key, &true);
        } else {
            self.env.storage().instance().remove(&key);
        }
    }

    // Proposals

    pub fn proposal_count(&self) -> u32 {
        self.env
            .storage()
            .instance()
            .get(&DataKey::ProposalCount)
            .unwrap_or(0)
    }

    /// Reserve the next proposal id.
    pub fn next_proposal_id(&self) -> Result<u32, GovernanceError> {
        let id = self.proposal_count();
        let next = id.checked_add(1).ok_or(GovernanceError::Overflow)?;
        self.env.storage().instance().set(&DataKey::ProposalCount, &next);
        Ok(id)
    }

    pub fn proposal(&self, id: u32) -> Result<Proposal, GovernanceError> {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Proposal(id))
            .ok_or(GovernanceError::ProposalNotFound)
    }

    pub fn save_proposal(&self, proposal: &Proposal) {
        let key = DataKey::Proposal(proposal.id);
        self.env.storage().persistent().set(&key, proposal);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
    }

    /// Keep a queued proposal readable for `live_for` seconds on top of the
    /// usual record lifetime, capped at the network's maximum TTL.
    pub fn keep_proposal_for(&self, id: u32, live_for: u64) {
        let key = DataKey::Proposal(id);
        let ledgers = (live_for / LEDGER_CLOSE_SECONDS).saturating_add(RECORD_BUMP_AMOUNT as u64);
        let extend_to = u32::try_from(ledgers)
            .unwrap_or(u32::MAX)
            .min(self.env.storage().max_ttl());
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, extend_to, extend_to);
    }

    pub fn vote(&self, id: u32, voter: &Address) -> Option<Vote> {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Vote(id, voter.clone()))
    }

    pub fn save_vote(&self, id: u32, voter: &Address, vote: &Vote) {
        let key = DataKey::Vote(id, voter.clone());
        self.env.storage().persistent().set(&key, vote);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
    }

    pub fn is_executing(&self, id: u32) -> bool {
        self.env.storage().temporary().has(&DataKey::Executing(id))
    }

    pub fn set_executing(&self, id: u32, executing: bool) {
        let key = DataKey::Executing(id);
        if executing {
            self.env.storage().temporary().set(&key, &true);
        } else {
            self.env.storage().temporary().remove(&key);
        }
    }

    // Signed votes

    pub fn nonce(&self, voter: &Address) -> u64 {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Nonce(voter.clone()))
            .unwrap_or(0)
    }

    pub fn set_nonce(&self, voter: &Address, nonce: u64) {
        let key = DataKey::Nonce(voter.clone());
        self.env.storage().persistent().set(&key, &nonce);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
    }

    pub fn vote_signer(&self, voter: &Address) -> Option<BytesN<32>> {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::VoteSigner(voter.clone()))
    }

    pub fn set_vote_signer(&self, voter: &Address, signer: Option<&BytesN<32>>) {
        let key = DataKey::VoteSigner(voter.clone());
        match signer {
            Some(public_key) => {
                self.env.storage().persistent().set(&key, public_key);
                self.env
                    .storage()
                    .persistent()
                    .extend_ttl(&key, RECORD_LIFETIME_THRESHOLD, RECORD_BUMP_AMOUNT);
            }
            None => self.env.storage().persistent().remove(&key),
        }
    }
}
