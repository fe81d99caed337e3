#![no_std]
//! Governance Strategy
//!
//! Reference power oracle for the governance registry. Voting and
//! proposition power of an account is the sum of its checkpointed power
//! across the configured power tokens (for example the governance token and
//! its staked form). Total power, for both kinds, is the historical total
//! supply of the supply token.

mod error;
mod storage;
pub mod testutils;

use governance_interface::{PowerKind, PowerTokenClient};
use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};

pub use crate::error::StrategyError;
use crate::storage::Storage;

pub trait GovernanceStrategyTrait {
    /// Configure the token set. Can only be called once.
    fn init(env: Env, supply_token: Address, power_tokens: Vec<Address>) -> Result<(), StrategyError>;

    /// Power of `account` as of `ledger`. Future ledgers are rejected.
    fn power_at(env: Env, account: Address, ledger: u32, kind: PowerKind) -> Result<i128, StrategyError>;
    /// Total power as of `ledger`. Future ledgers are rejected.
    fn total_power_at(env: Env, ledger: u32, kind: PowerKind) -> Result<i128, StrategyError>;

    fn get_power_tokens(env: Env) -> Result<Vec<Address>, StrategyError>;
    fn get_supply_token(env: Env) -> Result<Address, StrategyError>;
}

#[contract]
pub struct GovernanceStrategy;

#[contractimpl]
impl GovernanceStrategyTrait for GovernanceStrategy {
    fn init(env: Env, supply_token: Address, power_tokens: Vec<Address>) -> Result<(), StrategyError> {
        let store = Storage::new(&env);
        if store.is_initialized() {
            return Err(StrategyError::AlreadyInitialized);
        }
        if power_tokens.is_empty() {
            return Err(StrategyError::NoPowerTokens);
        }
        store.init(&supply_token, &power_tokens);
        log!(&env, "strategy initialized", supply_token, power_tokens.len());
        Ok(())
    }

    fn power_at(env: Env, account: Address, ledger: u32, kind: PowerKind) -> Result<i128, StrategyError> {
        ensure_past_ledger(&env, ledger)?;
        let mut total: i128 = 0;
        for token in Storage::new(&env).power_tokens()?.iter() {
            let power = PowerTokenClient::new(&env, &token).get_power_at(&account, &ledger, &kind);
            total = total.checked_add(power).ok_or(StrategyError::Overflow)?;
        }
        Ok(total)
    }

    fn total_power_at(env: Env, ledger: u32, _kind: PowerKind) -> Result<i128, StrategyError> {
        ensure_past_ledger(&env, ledger)?;
        let supply_token = Storage::new(&env).supply_token()?;
        Ok(PowerTokenClient::new(&env, &supply_token).total_supply_at(&ledger))
    }

    fn get_power_tokens(env: Env) -> Result<Vec<Address>, StrategyError> {
        Storage::new(&env).power_tokens()
    }

    fn get_supply_token(env: Env) -> Result<Address, StrategyError> {
        Storage::new(&env).supply_token()
    }
}

fn ensure_past_ledger(env: &Env, ledger: u32) -> Result<(), StrategyError> {
    if ledger > env.ledger().sequence() {
        return Err(StrategyError::InvalidLedger);
    }
    Ok(())
}
