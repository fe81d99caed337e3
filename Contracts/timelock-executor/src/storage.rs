use soroban_sdk::{contracttype, Address, BytesN, Env};
use crate::{error::ExecutorError, types::ExecutorConfig};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const LEDGER_CLOSE_SECONDS: u64 = 5;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    PendingAdmin,
    Config,
    ValueToken,
    Queued(BytesN<32>),
}

pub struct Storage<'a> {
    env: &'a Env,
}

impl<'a> Storage<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    pub fn is_initialized(&self) -> bool {
        self.env.storage().instance().has(&DataKey::Admin)
    }

    pub fn require_initialized(&self) -> Result<(), ExecutorError> {
        if self.is_initialized() { Ok(()) } else { Err(ExecutorError::NotInitialized) }
    }

    pub fn init(&self, admin: &Address, value_token: &Address, config: &ExecutorConfig) {
        let instance = self.env.storage().instance();
        instance.set(&DataKey::Admin, admin);
        instance.set(&DataKey::ValueToken, value_token);
        instance.set(&DataKey::Config, config);
        self.extend_instance();
    }

    pub fn extend_instance(&self) {
        self.env
            .storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    pub fn admin(&self) -> Result<Address, ExecutorError> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ExecutorError::NotInitialized)
    }

    pub fn set_admin(&self, admin: &Address) {
        self.env.storage().instance().set(&DataKey::Admin, admin);
    }

    pub fn pending_admin(&self) -> Option<Address> {
        self.env.storage().instance().get(&DataKey::PendingAdmin)
    }

    pub fn set_pending_admin(&self, pending: Option<&Address>) {
        match pending {
            Some(addr) => self.env.storage().instance().set(&DataKey::PendingAdmin, addr),
            None => self.env.storage().instance().remove(&DataKey::PendingAdmin),
        }
    }

    pub fn config(&self) -> Result<ExecutorConfig, ExecutorError> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(ExecutorError::NotInitialized)
    }

    pub fn save_config(&self, config: &ExecutorConfig) {
        self.env.storage().instance().set(&DataKey::Config, config);
    }

    pub fn value_token(&self) -> Result<Address, ExecutorError> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::ValueToken)
            .ok_or(ExecutorError::NotInitialized)
    }

    pub fn is_queued(&self, action_hash: &BytesN<32>) -> bool {
        self.env
            .storage()
            .persistent()
            .has(&DataKey::Queued(action_hash.clone()))
    }

    /// Queue `action_hash` and keep the entry live for `live_for` seconds
    /// plus a day, capped at the network's maximum TTL.
    pub fn mark_queued(&self, action_hash: &BytesN<32>, live_for: u64) {
        let key = DataKey::Queued(action_hash.clone());
        let ledgers = (live_for / LEDGER_CLOSE_SECONDS).saturating_add(DAY_IN_LEDGERS as u64);
        let extend_to = u32::try_from(ledgers)
            .unwrap_or(u32::MAX)
            .min(self.env.storage().max_ttl());
        self.env.storage().persistent().set(&key, &true);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, extend_to, extend_to);
    }

    pub fn unmark_queued(&self, action_hash: &BytesN<32>) {
        self.env
            .storage()
            .persistent()
            .remove(&DataKey::Queued(action_hash.clone()));
    }
}
