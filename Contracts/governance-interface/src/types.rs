use soroban_sdk::{contracttype, Address, Symbol, Val, Vec};

/// Which dimension of governance power a query refers to.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PowerKind {
    Voting,
    Proposition,
}

/// How the executor runs a single action.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvocationMode {
    /// Plain cross-contract call of `signature(calldata..)` on the target.
    Call,
    /// Payload call: the target receives the executor address as its first
    /// argument and acts for the executor's context.
    DelegateCall,
}

impl InvocationMode {
    pub fn from_flag(with_delegatecall: bool) -> Self {
        if with_delegatecall {
            InvocationMode::DelegateCall
        } else {
            InvocationMode::Call
        }
    }

    pub fn is_delegate(&self) -> bool {
        matches!(self, InvocationMode::DelegateCall)
    }
}

/// The identity of a queued action. Its hash is the key of the executor's
/// queue, so two actions with equal fields collide.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimelockAction {
    pub target: Address,
    pub value: i128,
    pub signature: Symbol,
    pub calldata: Vec<Val>,
    pub execution_time: u64,
    pub with_delegatecall: bool,
}

/// Recorded votes of a proposal together with the total voting supply at the
/// proposal's snapshot ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteTally {
    pub for_votes: i128,
    pub against_votes: i128,
    pub voting_supply: i128,
}
