use soroban_sdk::{contracttype, Address, Env, Vec};
use crate::error::StrategyError;

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    SupplyToken,
    PowerTokens,
}

pub struct Storage<'a> {
    env: &'a Env,
}

impl<'a> Storage<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    pub fn is_initialized(&self) -> bool {
        self.env.storage().instance().has(&DataKey::SupplyToken)
    }

    pub fn init(&self, supply_token: &Address, power_tokens: &Vec<Address>) {
        let instance = self.env.storage().instance();
        instance.set(&DataKey::SupplyToken, supply_token);
        instance.set(&DataKey::PowerTokens, power_tokens);
        instance.extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    pub fn supply_token(&self) -> Result<Address, StrategyError> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::SupplyToken)
            .ok_or(StrategyError::NotInitialized)
    }

    pub fn power_tokens(&self) -> Result<Vec<Address>, StrategyError> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::PowerTokens)
            .ok_or(StrategyError::NotInitialized)
    }
}
