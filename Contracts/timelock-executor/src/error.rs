use core::fmt;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ExecutorError {
    // Setup
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfig = 3,

    // Delay bounds
    DelayShorterThanMinimum = 4,
    DelayLongerThanMaximum = 5,

    // Admin handover
    NotPendingAdmin = 6,

    // Queue
    ExecutionTimeUnderestimated = 7,
    DuplicatedAction = 8,
    ActionNotQueued = 9,
    TimelockNotFinished = 10,
    GracePeriodFinished = 11,
    NotEnoughBalance = 12,

    // Actions addressed to the executor itself
    UnsupportedLocalAction = 13,
    InvalidLocalArguments = 14,

    Overflow = 15,
    InvalidValue = 16,
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutorError::AlreadyInitialized => write!(f, "Executor is already initialized"),
            ExecutorError::NotInitialized => write!(f, "Executor is not initialized"),
            ExecutorError::InvalidConfig => write!(f, "Invalid executor configuration"),

            ExecutorError::DelayShorterThanMinimum => write!(f, "Delay shorter than minimum"),
            ExecutorError::DelayLongerThanMaximum => write!(f, "Delay longer than maximum"),

            ExecutorError::NotPendingAdmin => write!(f, "Only callable by pending admin"),

            ExecutorError::ExecutionTimeUnderestimated => write!(f, "Execution time underestimated"),
            ExecutorError::DuplicatedAction => write!(f, "Duplicated action"),
            ExecutorError::ActionNotQueued => write!(f, "Action not queued"),
            ExecutorError::TimelockNotFinished => write!(f, "Timelock not finished"),
            ExecutorError::GracePeriodFinished => write!(f, "Grace period finished"),
            ExecutorError::NotEnoughBalance => write!(f, "Not enough balance to cover action value"),

            ExecutorError::UnsupportedLocalAction => write!(f, "Unsupported action on the executor"),
            ExecutorError::InvalidLocalArguments => write!(f, "Invalid arguments for executor action"),

            ExecutorError::Overflow => write!(f, "Arithmetic overflow"),
            ExecutorError::InvalidValue => write!(f, "Action value must not be negative"),
        }
    }
}
