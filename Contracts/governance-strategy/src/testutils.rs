#![cfg(any(test, feature = "testutils"))]

//! Checkpointed power token for tests of the strategy and the registry.

use governance_interface::PowerKind;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

#[contracttype]
#[derive(Clone)]
pub struct Checkpoint {
    pub ledger: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
enum CheckpointKey {
    Power(Address, PowerKind),
    Supply,
}

#[contract]
pub struct CheckpointToken;

#[contractimpl]
impl CheckpointToken {
    /// Record both kinds of power for `account` from the current ledger on.
    pub fn set_balance(env: Env, account: Address, amount: i128) {
        write(&env, CheckpointKey::Power(account.clone(), PowerKind::Voting), amount);
        write(&env, CheckpointKey::Power(account, PowerKind::Proposition), amount);
    }

    pub fn set_power(env: Env, account: Address, kind: PowerKind, amount: i128) {
        write(&env, CheckpointKey::Power(account, kind), amount);
    }

    pub fn set_supply(env: Env, amount: i128) {
        write(&env, CheckpointKey::Supply, amount);
    }

    pub fn get_power_at(env: Env, account: Address, ledger: u32, kind: PowerKind) -> i128 {
        read_at(&env, CheckpointKey::Power(account, kind), ledger)
    }

    pub fn total_supply_at(env: Env, ledger: u32) -> i128 {
        read_at(&env, CheckpointKey::Supply, ledger)
    }
}

fn write(env: &Env, key: CheckpointKey, amount: i128) {
    let ledger = env.ledger().sequence();
    let mut checkpoints: Vec<Checkpoint> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));
    if checkpoints.last().is_some_and(|last| last.ledger == ledger) {
        checkpoints.pop_back();
    }
    checkpoints.push_back(Checkpoint { ledger, amount });
    env.storage().persistent().set(&key, &checkpoints);
}

fn read_at(env: &Env, key: CheckpointKey, ledger: u32) -> i128 {
    let checkpoints: Vec<Checkpoint> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));
    let mut amount = 0;
    for checkpoint in checkpoints.iter() {
        if checkpoint.ledger > ledger {
            break;
        }
        amount = checkpoint.amount;
    }
    amount
}
