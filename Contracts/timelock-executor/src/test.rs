#![cfg(test)]

use governance_interface::{action_hash, PowerKind, TimelockAction, VoteTally};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short,
    testutils::{storage::Persistent as _, Address as _, Ledger},
    token, vec, Address, Env, IntoVal, Symbol, Val, Vec,
};
use crate::{
    storage::DataKey, ExecutorConfig, ExecutorError, TimelockExecutor, TimelockExecutorClient, MAXIMUM_DELAY,
    MINIMUM_DELAY,
};

// Contracts the executor runs actions against.

#[contract]
pub struct ParamTarget;

#[contractimpl]
impl ParamTarget {
    pub fn set_param(env: Env, value: u32) -> u32 {
        env.storage().instance().set(&symbol_short!("param"), &value);
        value
    }

    pub fn param(env: Env) -> u32 {
        env.storage().instance().get(&symbol_short!("param")).unwrap_or(0)
    }
}

#[contract]
pub struct PayloadTarget;

#[contractimpl]
impl PayloadTarget {
    pub fn apply(env: Env, context: Address, value: u32) {
        env.storage().instance().set(&symbol_short!("ctx"), &context);
        env.storage().instance().set(&symbol_short!("value"), &value);
    }

    pub fn context(env: Env) -> Option<Address> {
        env.storage().instance().get(&symbol_short!("ctx"))
    }
}

#[contracttype]
#[derive(Clone)]
enum OracleKey {
    Power(Address, PowerKind),
    Total(PowerKind),
}

#[contract]
pub struct MockOracle;

#[contractimpl]
impl MockOracle {
    pub fn set_power(env: Env, account: Address, kind: PowerKind, amount: i128) {
        env.storage().instance().set(&OracleKey::Power(account, kind), &amount);
    }

    pub fn set_total(env: Env, kind: PowerKind, amount: i128) {
        env.storage().instance().set(&OracleKey::Total(kind), &amount);
    }

    pub fn power_at(env: Env, account: Address, _ledger: u32, kind: PowerKind) -> i128 {
        env.storage().instance().get(&OracleKey::Power(account, kind)).unwrap_or(0)
    }

    pub fn total_power_at(env: Env, _ledger: u32, kind: PowerKind) -> i128 {
        env.storage().instance().get(&OracleKey::Total(kind)).unwrap_or(0)
    }
}

const DAY: u64 = 86_400;
const GRACE_PERIOD: u64 = 5 * DAY;
const START_TIME: u64 = 1_700_000_000;

fn default_config() -> ExecutorConfig {
    ExecutorConfig {
        delay: MINIMUM_DELAY,
        grace_period: GRACE_PERIOD,
        voting_duration: 100,
        proposition_threshold: 200,
        vote_differential: 500,
        minimum_quorum: 2_000,
    }
}

struct Setup {
    env: Env,
    admin: Address,
    executor: TimelockExecutorClient<'static>,
    token: token::Client<'static>,
    token_admin: token::StellarAssetClient<'static>,
    target: ParamTargetClient<'static>,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START_TIME);

    let admin = Address::generate(&env);
    let issuer = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(issuer);
    let token = token::Client::new(&env, &sac.address());
    let token_admin = token::StellarAssetClient::new(&env, &sac.address());

    let executor_id = env.register(TimelockExecutor {}, ());
    let executor = TimelockExecutorClient::new(&env, &executor_id);
    executor.init(&admin, &sac.address(), &default_config());

    let target_id = env.register(ParamTarget {}, ());
    let target = ParamTargetClient::new(&env, &target_id);

    Setup { env, admin, executor, token, token_admin, target }
}

fn set_param_call(env: &Env, value: u32) -> Vec<Val> {
    vec![env, value.into_val(env)]
}

#[test]
fn test_init_and_getters() {
    let s = setup();
    assert_eq!(s.executor.get_admin(), s.admin);
    assert_eq!(s.executor.get_delay(), MINIMUM_DELAY);
    assert_eq!(s.executor.get_grace_period(), GRACE_PERIOD);
    assert_eq!(s.executor.get_voting_duration(), 100);
    assert_eq!(s.executor.get_pending_admin(), None);
    assert_eq!(s.executor.get_value_token(), s.token.address);
    let bounds = s.executor.get_delay_bounds();
    assert_eq!(bounds.minimum, MINIMUM_DELAY);
    assert_eq!(bounds.maximum, MAXIMUM_DELAY);
}

#[test]
fn test_init_twice_fails() {
    let s = setup();
    let result = s.executor.try_init(&s.admin, &s.token.address, &default_config());
    assert_eq!(result, Err(Ok(ExecutorError::AlreadyInitialized)));
}

#[test]
fn test_init_rejects_delay_out_of_bounds() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let token = Address::generate(&env);
    let executor = TimelockExecutorClient::new(&env, &env.register(TimelockExecutor {}, ()));

    let mut config = default_config();
    config.delay = MINIMUM_DELAY - 1;
    assert_eq!(
        executor.try_init(&admin, &token, &config),
        Err(Ok(ExecutorError::DelayShorterThanMinimum))
    );

    config.delay = MAXIMUM_DELAY + 1;
    assert_eq!(
        executor.try_init(&admin, &token, &config),
        Err(Ok(ExecutorError::DelayLongerThanMaximum))
    );
}

#[test]
fn test_init_rejects_invalid_thresholds() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let token = Address::generate(&env);
    let executor = TimelockExecutorClient::new(&env, &env.register(TimelockExecutor {}, ()));

    let mut config = default_config();
    config.minimum_quorum = 10_001;
    assert_eq!(
        executor.try_init(&admin, &token, &config),
        Err(Ok(ExecutorError::InvalidConfig))
    );

    let mut config = default_config();
    config.grace_period = 0;
    assert_eq!(
        executor.try_init(&admin, &token, &config),
        Err(Ok(ExecutorError::InvalidConfig))
    );
}

#[test]
fn test_queue_rejects_underestimated_execution_time() {
    let s = setup();
    let eta = START_TIME + MINIMUM_DELAY - 1;
    let result = s.executor.try_queue_transaction(
        &s.target.address,
        &0,
        &symbol_short!("set_param"),
        &set_param_call(&s.env, 7),
        &eta,
        &false,
    );
    assert_eq!(result, Err(Ok(ExecutorError::ExecutionTimeUnderestimated)));
}

#[test]
fn test_queue_rejects_duplicated_action() {
    let s = setup();
    let eta = START_TIME + MINIMUM_DELAY;
    let calldata = set_param_call(&s.env, 7);
    let hash = s.executor.queue_transaction(
        &s.target.address,
        &0,
        &symbol_short!("set_param"),
        &calldata,
        &eta,
        &false,
    );
    assert!(s.executor.is_action_queued(&hash));

    let expected = action_hash(
        &s.env,
        &TimelockAction {
            target: s.target.address.clone(),
            value: 0,
            signature: symbol_short!("set_param"),
            calldata: calldata.clone(),
            execution_time: eta,
            with_delegatecall: false,
        },
    );
    assert_eq!(hash, expected);

    let again = s.executor.try_queue_transaction(
        &s.target.address,
        &0,
        &symbol_short!("set_param"),
        &calldata,
        &eta,
        &false,
    );
    assert_eq!(again, Err(Ok(ExecutorError::DuplicatedAction)));
}

#[test]
fn test_queue_rejects_negative_value() {
    let s = setup();
    let eta = START_TIME + MINIMUM_DELAY;
    let result = s.executor.try_queue_transaction(
        &s.target.address,
        &-5,
        &symbol_short!("set_param"),
        &set_param_call(&s.env, 7),
        &eta,
        &false,
    );
    assert_eq!(result, Err(Ok(ExecutorError::InvalidValue)));
}

#[test]
fn test_queued_action_outlives_maximum_delay_and_grace() {
    let s = setup();
    let eta = START_TIME + MAXIMUM_DELAY;
    let sig = symbol_short!("set_param");
    let hash = s.executor.queue_transaction(
        &s.target.address,
        &0,
        &sig,
        &set_param_call(&s.env, 3),
        &eta,
        &false,
    );

    let ttl = s.env.as_contract(&s.executor.address, || {
        s.env.storage().persistent().get_ttl(&DataKey::Queued(hash.clone()))
    });
    let window_in_ledgers = ((MAXIMUM_DELAY + GRACE_PERIOD) / 5) as u32;
    assert!(ttl >= window_in_ledgers);
}

#[test]
fn test_execute_respects_timelock_and_runs_once() {
    let s = setup();
    let eta = START_TIME + MINIMUM_DELAY;
    let calldata = set_param_call(&s.env, 42);
    let sig = symbol_short!("set_param");
    s.executor.queue_transaction(&s.target.address, &0, &sig, &calldata, &eta, &false);

    let early = s.executor.try_execute_transaction(&s.target.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(early.err(), Some(Ok(ExecutorError::TimelockNotFinished)));

    s.env.ledger().set_timestamp(eta);
    s.executor.execute_transaction(&s.target.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(s.target.param(), 42);

    let twice = s.executor.try_execute_transaction(&s.target.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(twice.err(), Some(Ok(ExecutorError::ActionNotQueued)));
}

#[test]
fn test_execute_after_grace_period_fails() {
    let s = setup();
    let eta = START_TIME + MINIMUM_DELAY;
    let calldata = set_param_call(&s.env, 1);
    let sig = symbol_short!("set_param");
    s.executor.queue_transaction(&s.target.address, &0, &sig, &calldata, &eta, &false);

    s.env.ledger().set_timestamp(eta + GRACE_PERIOD);
    assert!(!s.executor.is_proposal_over_grace_period(&eta));

    s.env.ledger().set_timestamp(eta + GRACE_PERIOD + 1);
    assert!(s.executor.is_proposal_over_grace_period(&eta));
    let late = s.executor.try_execute_transaction(&s.target.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(late.err(), Some(Ok(ExecutorError::GracePeriodFinished)));
    assert_eq!(s.target.param(), 0);
}

#[test]
fn test_cancel_drops_queued_action() {
    let s = setup();
    let eta = START_TIME + MINIMUM_DELAY;
    let calldata = set_param_call(&s.env, 9);
    let sig = symbol_short!("set_param");
    let hash = s.executor.queue_transaction(&s.target.address, &0, &sig, &calldata, &eta, &false);

    let cancelled = s.executor.cancel_transaction(&s.target.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(cancelled, hash);
    assert!(!s.executor.is_action_queued(&hash));

    s.env.ledger().set_timestamp(eta);
    let result = s.executor.try_execute_transaction(&s.target.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(result.err(), Some(Ok(ExecutorError::ActionNotQueued)));
}

#[test]
fn test_execute_moves_value_to_target() {
    let s = setup();
    s.token_admin.mint(&s.executor.address, &1_000);

    let eta = START_TIME + MINIMUM_DELAY;
    let calldata = set_param_call(&s.env, 3);
    let sig = symbol_short!("set_param");
    s.executor.queue_transaction(&s.target.address, &250, &sig, &calldata, &eta, &false);

    s.env.ledger().set_timestamp(eta);
    s.executor.execute_transaction(&s.target.address, &250, &sig, &calldata, &eta, &false);

    assert_eq!(s.token.balance(&s.target.address), 250);
    assert_eq!(s.token.balance(&s.executor.address), 750);
}

#[test]
fn test_execute_without_balance_fails() {
    let s = setup();
    let eta = START_TIME + MINIMUM_DELAY;
    let calldata = set_param_call(&s.env, 3);
    let sig = symbol_short!("set_param");
    s.executor.queue_transaction(&s.target.address, &250, &sig, &calldata, &eta, &false);

    s.env.ledger().set_timestamp(eta);
    let result = s.executor.try_execute_transaction(&s.target.address, &250, &sig, &calldata, &eta, &false);
    assert_eq!(result.err(), Some(Ok(ExecutorError::NotEnoughBalance)));
}

#[test]
fn test_delegate_mode_hands_executor_context_to_payload() {
    let s = setup();
    let payload = PayloadTargetClient::new(&s.env, &s.env.register(PayloadTarget {}, ()));

    let eta = START_TIME + MINIMUM_DELAY;
    let calldata: Vec<Val> = vec![&s.env, 5_u32.into_val(&s.env)];
    let sig = symbol_short!("apply");
    s.executor.queue_transaction(&payload.address, &0, &sig, &calldata, &eta, &true);

    s.env.ledger().set_timestamp(eta);
    s.executor.execute_transaction(&payload.address, &0, &sig, &calldata, &eta, &true);

    assert_eq!(payload.context(), Some(s.executor.address.clone()));
}

#[test]
fn test_self_action_changes_delay() {
    let s = setup();
    let new_delay = 2 * DAY;
    let sig = Symbol::new(&s.env, "set_delay");
    let calldata: Vec<Val> = vec![&s.env, new_delay.into_val(&s.env)];
    let eta = START_TIME + MINIMUM_DELAY;
    s.executor.queue_transaction(&s.executor.address, &0, &sig, &calldata, &eta, &false);

    s.env.ledger().set_timestamp(eta);
    s.executor.execute_transaction(&s.executor.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(s.executor.get_delay(), new_delay);
}

#[test]
fn test_self_action_rejects_delay_below_minimum() {
    let s = setup();
    let sig = Symbol::new(&s.env, "set_delay");
    let calldata: Vec<Val> = vec![&s.env, (MINIMUM_DELAY - 1).into_val(&s.env)];
    let eta = START_TIME + MINIMUM_DELAY;
    s.executor.queue_transaction(&s.executor.address, &0, &sig, &calldata, &eta, &false);

    s.env.ledger().set_timestamp(eta);
    let result = s.executor.try_execute_transaction(&s.executor.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(result.err(), Some(Ok(ExecutorError::DelayShorterThanMinimum)));
    assert_eq!(s.executor.get_delay(), MINIMUM_DELAY);
}

#[test]
fn test_self_action_unknown_function_is_rejected() {
    let s = setup();
    let sig = symbol_short!("rug");
    let calldata: Vec<Val> = vec![&s.env, 1_u32.into_val(&s.env)];
    let eta = START_TIME + MINIMUM_DELAY;
    s.executor.queue_transaction(&s.executor.address, &0, &sig, &calldata, &eta, &false);

    s.env.ledger().set_timestamp(eta);
    let result = s.executor.try_execute_transaction(&s.executor.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(result.err(), Some(Ok(ExecutorError::UnsupportedLocalAction)));
}

#[test]
fn test_two_step_admin_handover() {
    let s = setup();
    let next_admin = Address::generate(&s.env);
    let sig = Symbol::new(&s.env, "set_pending_admin");
    let calldata: Vec<Val> = vec![&s.env, Some(next_admin.clone()).into_val(&s.env)];
    let eta = START_TIME + MINIMUM_DELAY;
    s.executor.queue_transaction(&s.executor.address, &0, &sig, &calldata, &eta, &false);

    s.env.ledger().set_timestamp(eta);
    s.executor.execute_transaction(&s.executor.address, &0, &sig, &calldata, &eta, &false);
    assert_eq!(s.executor.get_pending_admin(), Some(next_admin.clone()));
    assert_eq!(s.executor.get_admin(), s.admin);

    s.executor.accept_admin();
    assert_eq!(s.executor.get_admin(), next_admin);
    assert_eq!(s.executor.get_pending_admin(), None);
}

#[test]
fn test_accept_admin_without_pending_admin_fails() {
    let s = setup();
    assert_eq!(s.executor.try_accept_admin(), Err(Ok(ExecutorError::NotPendingAdmin)));
}

#[test]
#[should_panic]
fn test_set_delay_requires_executor_itself() {
    let s = setup();
    s.env.set_auths(&[]);
    s.executor.set_delay(&(2 * DAY));
}

#[test]
#[should_panic]
fn test_queue_requires_admin() {
    let s = setup();
    s.env.set_auths(&[]);
    s.executor.queue_transaction(
        &s.target.address,
        &0,
        &symbol_short!("set_param"),
        &set_param_call(&s.env, 1),
        &(START_TIME + MINIMUM_DELAY),
        &false,
    );
}

#[test]
fn test_proposition_power_threshold() {
    let s = setup();
    let oracle = MockOracleClient::new(&s.env, &s.env.register(MockOracle {}, ()));
    let creator = Address::generate(&s.env);
    oracle.set_total(&PowerKind::Proposition, &10_000);

    // 2% of 10_000
    assert_eq!(s.executor.min_proposition_power_needed(&oracle.address, &10), 200);

    oracle.set_power(&creator, &PowerKind::Proposition, &200);
    assert!(s.executor.validate_creator_of_proposal(&oracle.address, &creator, &10));
    assert!(!s.executor.validate_proposal_cancellation(&oracle.address, &creator, &10));

    oracle.set_power(&creator, &PowerKind::Proposition, &199);
    assert!(!s.executor.is_proposition_power_enough(&oracle.address, &creator, &10));
    assert!(s.executor.validate_proposal_cancellation(&oracle.address, &creator, &10));
}

#[test]
fn test_quorum_and_differential_predicates() {
    let s = setup();
    // supply 1_000: quorum 20% -> 200 cast, differential 5% -> margin 50
    let passing = VoteTally { for_votes: 180, against_votes: 20, voting_supply: 1_000 };
    assert!(s.executor.is_quorum_valid(&passing));
    assert!(s.executor.is_vote_differential_valid(&passing));
    assert!(s.executor.is_proposal_passed(&passing));

    let thin_turnout = VoteTally { for_votes: 150, against_votes: 0, voting_supply: 1_000 };
    assert!(!s.executor.is_quorum_valid(&thin_turnout));
    assert!(!s.executor.is_proposal_passed(&thin_turnout));

    let contested = VoteTally { for_votes: 120, against_votes: 100, voting_supply: 1_000 };
    assert!(s.executor.is_quorum_valid(&contested));
    assert!(!s.executor.is_vote_differential_valid(&contested));
    assert!(!s.executor.is_proposal_passed(&contested));

    assert_eq!(s.executor.get_minimum_voting_power_needed(&1_000), 200);
}
