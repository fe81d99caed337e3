use governance_interface::TimelockAction;
use soroban_sdk::{contractevent, Address, BytesN, Env, Symbol, Val, Vec};

#[contractevent]
pub struct NewDelay {
    pub delay: u64,
}

#[contractevent]
pub struct NewPendingAdmin {
    pub new_pending_admin: Option<Address>,
}

#[contractevent]
pub struct NewAdmin {
    #[topic]
    pub new_admin: Address,
}

#[contractevent]
pub struct QueuedAction {
    #[topic]
    pub action_hash: BytesN<32>,
    pub target: Address,
    pub value: i128,
    pub signature: Symbol,
    pub calldata: Vec<Val>,
    pub execution_time: u64,
    pub with_delegatecall: bool,
}

#[contractevent]
pub struct CancelledAction {
    #[topic]
    pub action_hash: BytesN<32>,
    pub target: Address,
    pub value: i128,
    pub signature: Symbol,
    pub calldata: Vec<Val>,
    pub execution_time: u64,
    pub with_delegatecall: bool,
}

#[contractevent]
pub struct ExecutedAction {
    #[topic]
    pub action_hash: BytesN<32>,
    pub target: Address,
    pub value: i128,
    pub signature: Symbol,
    pub calldata: Vec<Val>,
    pub execution_time: u64,
    pub with_delegatecall: bool,
    pub result_data: Val,
}

pub struct Events;

impl Events {
    pub fn emit_new_delay(env: &Env, delay: u64) {
        NewDelay { delay }.publish(env);
    }

    pub fn emit_new_pending_admin(env: &Env, new_pending_admin: Option<Address>) {
        NewPendingAdmin { new_pending_admin }.publish(env);
    }

    pub fn emit_new_admin(env: &Env, new_admin: &Address) {
        NewAdmin {
            new_admin: new_admin.clone(),
        }
        .publish(env);
    }

    pub fn emit_queued_action(env: &Env, action_hash: &BytesN<32>, action: &TimelockAction) {
        QueuedAction {
            action_hash: action_hash.clone(),
            target: action.target.clone(),
            value: action.value,
            signature: action.signature.clone(),
            calldata: action.calldata.clone(),
            execution_time: action.execution_time,
            with_delegatecall: action.with_delegatecall,
        }
        .publish(env);
    }

    pub fn emit_cancelled_action(env: &Env, action_hash: &BytesN<32>, action: &TimelockAction) {
        CancelledAction {
            action_hash: action_hash.clone(),
            target: action.target.clone(),
            value: action.value,
            signature: action.signature.clone(),
            calldata: action.calldata.clone(),
            execution_time: action.execution_time,
            with_delegatecall: action.with_delegatecall,
        }
        .publish(env);
    }

    pub fn emit_executed_action(
        env: &Env,
        action_hash: &BytesN<32>,
        action: &TimelockAction,
        result_data: Val,
    ) {
        ExecutedAction {
            action_hash: action_hash.clone(),
            target: action.target.clone(),
            value: action.value,
            signature: action.signature.clone(),
            calldata: action.calldata.clone(),
            execution_time: action.execution_time,
            with_delegatecall: action.with_delegatecall,
            result_data,
        }
        .publish(env);
    }
}
