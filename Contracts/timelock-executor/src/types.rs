use soroban_sdk::contracttype;

/// Runtime parameters of one executor.
///
/// `delay` and `grace_period` are seconds, `voting_duration` is ledgers, and
/// the three thresholds are basis points of
/// [`governance_interface::ONE_HUNDRED_WITH_PRECISION`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutorConfig {
    pub delay: u64,
    pub grace_period: u64,
    pub voting_duration: u32,
    pub proposition_threshold: u32,
    pub vote_differential: u32,
    pub minimum_quorum: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelayBounds {
    pub minimum: u64,
    pub maximum: u64,
}
