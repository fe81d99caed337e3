#![no_std]
//! Governance Interface
//!
//! Shared vocabulary of the governance contracts: the types that cross
//! contract boundaries, the deterministic action hash, and the client traits
//! each contract uses to reach the others.
//!
//! The registry talks to its executors only through [`ExecutorClient`] and to
//! the power oracle only through [`VotingPowerOracleClient`]; the reference
//! strategy reads the underlying power tokens through [`PowerTokenClient`].

mod types;

pub use types::{InvocationMode, PowerKind, TimelockAction, VoteTally};

use soroban_sdk::{contractclient, xdr::ToXdr, Address, BytesN, Env, Symbol, Val, Vec};

/// Denominator of every basis-point parameter (100.00%).
pub const ONE_HUNDRED_WITH_PRECISION: i128 = 10_000;

/// Keccak-256 of the XDR encoding of `action`.
///
/// Both the registry (duplicate detection before queueing) and the executor
/// (queue key) derive keys with this function.
pub fn action_hash(env: &Env, action: &TimelockAction) -> BytesN<32> {
    let encoded = action.clone().to_xdr(env);
    env.crypto().keccak256(&encoded).to_bytes()
}

/// Timelock executor surface used by the registry.
#[contractclient(name = "ExecutorClient")]
pub trait ExecutorInterface {
    fn get_delay(env: Env) -> u64;
    fn get_grace_period(env: Env) -> u64;
    fn get_voting_duration(env: Env) -> u32;
    fn is_action_queued(env: Env, action_hash: BytesN<32>) -> bool;
    fn is_proposal_over_grace_period(env: Env, execution_time: u64) -> bool;

    fn queue_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        calldata: Vec<Val>,
        execution_time: u64,
        with_delegatecall: bool,
    ) -> BytesN<32>;

    fn cancel_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        calldata: Vec<Val>,
        execution_time: u64,
        with_delegatecall: bool,
    ) -> BytesN<32>;

    fn execute_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        calldata: Vec<Val>,
        execution_time: u64,
        with_delegatecall: bool,
    ) -> Val;

    fn validate_creator_of_proposal(env: Env, strategy: Address, user: Address, ledger: u32) -> bool;
    fn validate_proposal_cancellation(env: Env, strategy: Address, user: Address, ledger: u32) -> bool;
    fn is_proposal_passed(env: Env, tally: VoteTally) -> bool;
    fn is_quorum_valid(env: Env, tally: VoteTally) -> bool;
    fn is_vote_differential_valid(env: Env, tally: VoteTally) -> bool;
}

/// Historical voting and proposition power.
///
/// Answers for a past ledger never change, and ledgers ahead of the current
/// one are rejected.
#[contractclient(name = "VotingPowerOracleClient")]
pub trait VotingPowerOracle {
    fn power_at(env: Env, account: Address, ledger: u32, kind: PowerKind) -> i128;
    fn total_power_at(env: Env, ledger: u32, kind: PowerKind) -> i128;
}

/// Checkpointed token consumed by the reference strategy.
#[contractclient(name = "PowerTokenClient")]
pub trait PowerTokenInterface {
    fn get_power_at(env: Env, account: Address, ledger: u32, kind: PowerKind) -> i128;
    fn total_supply_at(env: Env, ledger: u32) -> i128;
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{symbol_short, testutils::Address as _, vec, IntoVal};

    fn sample(env: &Env, target: &Address, execution_time: u64) -> TimelockAction {
        TimelockAction {
            target: target.clone(),
            value: 0,
            signature: symbol_short!("set_param"),
            calldata: vec![env, 7_u32.into_val(env)],
            execution_time,
            with_delegatecall: false,
        }
    }

    #[test]
    fn test_action_hash_is_deterministic() {
        let env = Env::default();
        let target = Address::generate(&env);
        let a = sample(&env, &target, 1_000);
        let b = sample(&env, &target, 1_000);
        assert_eq!(action_hash(&env, &a), action_hash(&env, &b));
    }

    #[test]
    fn test_action_hash_covers_timing_and_mode() {
        let env = Env::default();
        let target = Address::generate(&env);
        let base = sample(&env, &target, 1_000);

        let later = sample(&env, &target, 1_001);
        assert_ne!(action_hash(&env, &base), action_hash(&env, &later));

        let mut delegated = base.clone();
        delegated.with_delegatecall = true;
        assert_ne!(action_hash(&env, &base), action_hash(&env, &delegated));
    }

    #[test]
    fn test_invocation_mode_flag() {
        assert_eq!(InvocationMode::from_flag(true), InvocationMode::DelegateCall);
        assert!(!InvocationMode::from_flag(false).is_delegate());
    }
}
