#![no_std]
//! Timelock Executor
//!
//! Holds the actions of succeeded governance proposals for a mandatory delay
//! and runs them inside a grace window. The executor's admin (the governance
//! registry that owns it) is the only account that may queue, cancel or run
//! actions. The executor also answers whether a proposal's creator holds
//! enough proposition power and whether a finished vote met quorum and the
//! vote differential.
//!
//! Parameters change only through the executor itself: `set_delay` and
//! `set_pending_admin` are reached by executing a proposal whose action
//! targets this contract. The host forbids re-entry, so such actions are
//! dispatched internally instead of through a cross-contract call.

mod error;
mod events;
mod storage;
mod types;
mod validator;

use governance_interface::{
    action_hash, PowerKind, TimelockAction, VoteTally, VotingPowerOracleClient,
};
use soroban_sdk::{
    contract, contractimpl, log, token, Address, BytesN, Env, IntoVal, Symbol, TryFromVal, Val,
    Vec,
};

pub use crate::error::ExecutorError;
pub use crate::types::{DelayBounds, ExecutorConfig};
use crate::{events::Events, storage::Storage};

/// Shortest delay any executor may be configured with (1 day).
pub const MINIMUM_DELAY: u64 = 86_400;
/// Longest delay any executor may be configured with (30 days).
pub const MAXIMUM_DELAY: u64 = 30 * 86_400;

const MAX_BPS: u32 = 10_000;

/// Timelock executor interface.
pub trait TimelockExecutorTrait {
    /// Configure the executor. `admin` is the governance registry allowed to
    /// drive the queue; `value_token` is the asset moved by actions carrying a
    /// non-zero value. Can only be called once.
    fn init(
        env: Env,
        admin: Address,
        value_token: Address,
        config: ExecutorConfig,
    ) -> Result<(), ExecutorError>;

    /// Change the delay. Only the executor itself may call this.
    fn set_delay(env: Env, delay: u64) -> Result<(), ExecutorError>;
    /// Nominate the next admin. Only the executor itself may call this.
    fn set_pending_admin(env: Env, pending_admin: Option<Address>) -> Result<(), ExecutorError>;
    /// Complete the admin handover; callable by the pending admin only.
    fn accept_admin(env: Env) -> Result<(), ExecutorError>;

    fn queue_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        calldata: Vec<Val>,
        execution_time: u64,
        with_delegatecall: bool,
    ) -> Result<BytesN<32>, ExecutorError>;
    fn cancel_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        calldata: Vec<Val>,
        execution_time: u64,
        with_delegatecall: bool,
    ) -> Result<BytesN<32>, ExecutorError>;
    fn execute_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        calldata: Vec<Val>,
        execution_time: u64,
        with_delegatecall: bool,
    ) -> Result<Val, ExecutorError>;

    fn get_admin(env: Env) -> Result<Address, ExecutorError>;
    fn get_pending_admin(env: Env) -> Option<Address>;
    fn get_delay(env: Env) -> Result<u64, ExecutorError>;
    fn get_grace_period(env: Env) -> Result<u64, ExecutorError>;
    fn get_voting_duration(env: Env) -> Result<u32, ExecutorError>;
    fn get_config(env: Env) -> Result<ExecutorConfig, ExecutorError>;
    fn get_value_token(env: Env) -> Result<Address, ExecutorError>;
    fn get_delay_bounds(env: Env) -> DelayBounds;
    fn is_action_queued(env: Env, action_hash: BytesN<32>) -> bool;
    fn is_proposal_over_grace_period(env: Env, execution_time: u64) -> Result<bool, ExecutorError>;

    // Proposal validation
    fn is_proposition_power_enough(
        env: Env,
        strategy: Address,
        user: Address,
        ledger: u32,
    ) -> Result<bool, ExecutorError>;
    fn min_proposition_power_needed(env: Env, strategy: Address, ledger: u32) -> Result<i128, ExecutorError>;
    fn validate_creator_of_proposal(
        env: Env,
        strategy: Address,
        user: Address,
        ledger: u32,
    ) -> Result<bool, ExecutorError>;
    fn validate_proposal_cancellation(
        env: Env,
        strategy: Address,
        user: Address,
        ledger: u32,
    ) -> Result<bool, ExecutorError>;
    fn is_proposal_passed(env: Env, tally: VoteTally) -> Result<bool, ExecutorError>;
    fn is_quorum_valid(env: Env, tally: VoteTally) -> Result<bool, ExecutorError>;
    fn is_vote_differential_valid(env: Env, tally: VoteTally) -> Result<bool, ExecutorError>;
    fn get_minimum_voting_power_needed(env: Env, voting_supply: i128) -> Result<i128, ExecutorError>;
}

#[contract]
pub struct TimelockExecutor;

#[contractimpl]
impl TimelockExecutorTrait for TimelockExecutor {
    fn init(
        env: Env,
        admin: Address,
        value_token: Address,
        config: ExecutorConfig,
    ) -> Result<(), ExecutorError> {
        let store = Storage::new(&env);
        if store.is_initialized() {
            return Err(ExecutorError::AlreadyInitialized);
        }
        validate_delay(config.delay)?;
        if config.grace_period == 0
            || config.voting_duration == 0
            || config.proposition_threshold > MAX_BPS
            || config.vote_differential > MAX_BPS
            || config.minimum_quorum > MAX_BPS
        {
            return Err(ExecutorError::InvalidConfig);
        }
        store.init(&admin, &value_token, &config);
        log!(&env, "executor initialized", admin, config.delay);
        Ok(())
    }

    fn set_delay(env: Env, delay: u64) -> Result<(), ExecutorError> {
        env.current_contract_address().require_auth();
        apply_delay(&env, delay)
    }

    fn set_pending_admin(env: Env, pending_admin: Option<Address>) -> Result<(), ExecutorError> {
        env.current_contract_address().require_auth();
        apply_pending_admin(&env, pending_admin)
    }

    fn accept_admin(env: Env) -> Result<(), ExecutorError> {
        let store = Storage::new(&env);
        let pending = store.pending_admin().ok_or(ExecutorError::NotPendingAdmin)?;
        pending.require_auth();

        store.set_admin(&pending);
        store.set_pending_admin(None);
        store.extend_instance();

        log!(&env, "executor admin accepted", pending.clone());
        Events::emit_new_admin(&env, &pending);
        Ok(())
    }

    fn queue_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        calldata: Vec<Val>,
        execution_time: u64,
        with_delegatecall: bool,
    ) -> Result<BytesN<32>, ExecutorError> {
        let store = Storage::new(&env);
        store.admin()?.require_auth();
        let config = store.config()?;
        if value < 0 {
            return Err(ExecutorError::InvalidValue);
        }

        let now = env.ledger().timestamp();
        let earliest = now
            .checked_add(config.delay)
            .ok_or(ExecutorError::Overflow)?;
        if execution_time < earliest {
            return Err(ExecutorError::ExecutionTimeUnderestimated);
        }

        let action = TimelockAction {
            target,
            value,
            signature,
            calldata,
            execution_time,
            with_delegatecall,
        };
        let hash = action_hash(&env, &action);
        if store.is_queued(&hash) {
            return Err(ExecutorError::DuplicatedAction);
        }
        // The entry must outlive the whole execution window.
        let live_for = (execution_time - now).saturating_add(config.grace_period);
        store.mark_queued(&hash, live_for);
        store.extend_instance();

        Events::emit_queued_action(&env, &hash, &action);
        Ok(hash)
    }

    fn cancel_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        calldata: Vec<Val>,
        execution_time: u64,
        with_delegatecall: bool,
    ) -> Result<BytesN<32>, ExecutorError> {
        let store = Storage::new(&env);
        store.admin()?.require_auth();

        let action = TimelockAction {
            target,
            value,
            signature,
            calldata,
            execution_time,
            with_delegatecall,
        };
        let hash = action_hash(&env, &action);
        store.unmark_queued(&hash);

        Events::emit_cancelled_action(&env, &hash, &action);
        Ok(hash)
    }

    fn execute_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: Symbol,
        calldata: Vec<Val>,
        execution_time: u64,
        with_delegatecall: bool,
    ) -> Result<Val, ExecutorError> {
        let store = Storage::new(&env);
        let admin = store.admin()?;
        admin.require_auth();
        let config = store.config()?;

        let action = TimelockAction {
            target,
            value,
            signature,
            calldata,
            execution_time,
            with_delegatecall,
        };
        let hash = action_hash(&env, &action);
        if !store.is_queued(&hash) {
            return Err(ExecutorError::ActionNotQueued);
        }

        let now = env.ledger().timestamp();
        if now < execution_time {
            return Err(ExecutorError::TimelockNotFinished);
        }
        let deadline = execution_time
            .checked_add(config.grace_period)
            .ok_or(ExecutorError::Overflow)?;
        if now > deadline {
            return Err(ExecutorError::GracePeriodFinished);
        }

        // Dequeue before any external effect.
        store.unmark_queued(&hash);

        let this = env.current_contract_address();
        if action.value > 0 && action.target != this {
            transfer_value(&env, &store, &this, &action.target, action.value)?;
        }

        let result_data = if action.target == this {
            run_local_action(&env, &action.signature, &action.calldata)?;
            ().into_val(&env)
        } else if action.target == admin {
            // Applied by the admin itself once this call returns.
            ().into_val(&env)
        } else if action.with_delegatecall {
            let mut args: Vec<Val> = Vec::new(&env);
            args.push_back(this.into_val(&env));
            args.append(&action.calldata);
            env.invoke_contract::<Val>(&action.target, &action.signature, args)
        } else {
            env.invoke_contract::<Val>(&action.target, &action.signature, action.calldata.clone())
        };

        Events::emit_executed_action(&env, &hash, &action, result_data);
        Ok(result_data)
    }

    fn get_admin(env: Env) -> Result<Address, ExecutorError> {
        Storage::new(&env).admin()
    }

    fn get_pending_admin(env: Env) -> Option<Address> {
        Storage::new(&env).pending_admin()
    }

    fn get_delay(env: Env) -> Result<u64, ExecutorError> {
        Ok(Storage::new(&env).config()?.delay)
    }

    fn get_grace_period(env: Env) -> Result<u64, ExecutorError> {
        Ok(Storage::new(&env).config()?.grace_period)
    }

    fn get_voting_duration(env: Env) -> Result<u32, ExecutorError> {
        Ok(Storage::new(&env).config()?.voting_duration)
    }

    fn get_config(env: Env) -> Result<ExecutorConfig, ExecutorError> {
        Storage::new(&env).config()
    }

    fn get_value_token(env: Env) -> Result<Address, ExecutorError> {
        Storage::new(&env).value_token()
    }

    fn get_delay_bounds(_env: Env) -> DelayBounds {
        DelayBounds {
            minimum: MINIMUM_DELAY,
            maximum: MAXIMUM_DELAY,
        }
    }

    fn is_action_queued(env: Env, action_hash: BytesN<32>) -> bool {
        Storage::new(&env).is_queued(&action_hash)
    }

    fn is_proposal_over_grace_period(env: Env, execution_time: u64) -> Result<bool, ExecutorError> {
        let grace_period = Storage::new(&env).config()?.grace_period;
        let deadline = execution_time
            .checked_add(grace_period)
            .ok_or(ExecutorError::Overflow)?;
        Ok(env.ledger().timestamp() > deadline)
    }

    fn is_proposition_power_enough(
        env: Env,
        strategy: Address,
        user: Address,
        ledger: u32,
    ) -> Result<bool, ExecutorError> {
        let power = VotingPowerOracleClient::new(&env, &strategy).power_at(
            &user,
            &ledger,
            &PowerKind::Proposition,
        );
        let needed = Self::min_proposition_power_needed(env, strategy, ledger)?;
        Ok(power >= needed)
    }

    fn min_proposition_power_needed(env: Env, strategy: Address, ledger: u32) -> Result<i128, ExecutorError> {
        let threshold = Storage::new(&env).config()?.proposition_threshold;
        let total = VotingPowerOracleClient::new(&env, &strategy)
            .total_power_at(&ledger, &PowerKind::Proposition);
        validator::minimum_proposition_power(total, threshold)
    }

    fn validate_creator_of_proposal(
        env: Env,
        strategy: Address,
        user: Address,
        ledger: u32,
    ) -> Result<bool, ExecutorError> {
        Self::is_proposition_power_enough(env, strategy, user, ledger)
    }

    fn validate_proposal_cancellation(
        env: Env,
        strategy: Address,
        user: Address,
        ledger: u32,
    ) -> Result<bool, ExecutorError> {
        Ok(!Self::is_proposition_power_enough(env, strategy, user, ledger)?)
    }

    fn is_proposal_passed(env: Env, tally: VoteTally) -> Result<bool, ExecutorError> {
        let config = Storage::new(&env).config()?;
        Ok(validator::quorum_reached(&tally, config.minimum_quorum)?
            && validator::differential_reached(&tally, config.vote_differential)?)
    }

    fn is_quorum_valid(env: Env, tally: VoteTally) -> Result<bool, ExecutorError> {
        let config = Storage::new(&env).config()?;
        validator::quorum_reached(&tally, config.minimum_quorum)
    }

    fn is_vote_differential_valid(env: Env, tally: VoteTally) -> Result<bool, ExecutorError> {
        let config = Storage::new(&env).config()?;
        validator::differential_reached(&tally, config.vote_differential)
    }

    fn get_minimum_voting_power_needed(env: Env, voting_supply: i128) -> Result<i128, ExecutorError> {
        let config = Storage::new(&env).config()?;
        validator::minimum_voting_power(voting_supply, config.minimum_quorum)
    }
}

fn validate_delay(delay: u64) -> Result<(), ExecutorError> {
    if delay < MINIMUM_DELAY {
        return Err(ExecutorError::DelayShorterThanMinimum);
    }
    if delay > MAXIMUM_DELAY {
        return Err(ExecutorError::DelayLongerThanMaximum);
    }
    Ok(())
}

fn apply_delay(env: &Env, delay: u64) -> Result<(), ExecutorError> {
    validate_delay(delay)?;
    let store = Storage::new(env);
    let mut config = store.config()?;
    config.delay = delay;
    store.save_config(&config);
    store.extend_instance();

    log!(env, "executor delay changed", delay);
    Events::emit_new_delay(env, delay);
    Ok(())
}

fn apply_pending_admin(env: &Env, pending_admin: Option<Address>) -> Result<(), ExecutorError> {
    let store = Storage::new(env);
    store.require_initialized()?;
    store.set_pending_admin(pending_admin.as_ref());

    log!(env, "executor pending admin set", pending_admin.clone());
    Events::emit_new_pending_admin(env, pending_admin);
    Ok(())
}

/// Apply an action whose target is this executor.
fn run_local_action(env: &Env, signature: &Symbol, calldata: &Vec<Val>) -> Result<(), ExecutorError> {
    if calldata.len() != 1 {
        return Err(ExecutorError::InvalidLocalArguments);
    }
    let arg = calldata.get(0).ok_or(ExecutorError::InvalidLocalArguments)?;

    if *signature == Symbol::new(env, "set_delay") {
        let delay = u64::try_from_val(env, &arg).map_err(|_| ExecutorError::InvalidLocalArguments)?;
        apply_delay(env, delay)
    } else if *signature == Symbol::new(env, "set_pending_admin") {
        let pending = Option::<Address>::try_from_val(env, &arg)
            .map_err(|_| ExecutorError::InvalidLocalArguments)?;
        apply_pending_admin(env, pending)
    } else {
        Err(ExecutorError::UnsupportedLocalAction)
    }
}

fn transfer_value(
    env: &Env,
    store: &Storage,
    from: &Address,
    to: &Address,
    value: i128,
) -> Result<(), ExecutorError> {
    let token = token::Client::new(env, &store.value_token()?);
    if token.balance(from) < value {
        return Err(ExecutorError::NotEnoughBalance);
    }
    token.transfer(from, to, &value);
    Ok(())
}

#[cfg(test)]
mod test;
