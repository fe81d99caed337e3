use core::fmt;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GovernanceError {
    // Setup
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Proposal structure
    EmptyTargets = 3,
    InconsistentParams = 4,
    ExecutorNotAuthorized = 5,
    PropositionPowerTooLow = 6,
    ProposalNotFound = 7,

    // Voting
    VotingClosed = 8,
    VoteAlreadySubmitted = 9,

    // Signed votes
    InvalidSignature = 10,
    SignatureExpired = 11,
    InvalidNonce = 12,

    // Lifecycle
    InvalidStateForQueue = 13,
    DuplicatedAction = 14,
    OnlyQueuedProposals = 15,
    TimelockNotFinished = 16,
    ActionNotQueued = 17,
    ProposalExecuting = 18,
    OnlyBeforeExecuted = 19,
    CancellationInvalid = 20,

    // Administration
    NoGuardian = 21,
    UnsupportedLocalAction = 22,
    InvalidLocalArguments = 23,
    LocalActionNotAuthorized = 24,

    Overflow = 25,
    InvalidValue = 26,
}

impl fmt::Display for GovernanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GovernanceError::AlreadyInitialized => write!(f, "Governance is already initialized"),
            GovernanceError::NotInitialized => write!(f, "Governance is not initialized"),

            GovernanceError::EmptyTargets => write!(f, "Proposal has no targets"),
            GovernanceError::InconsistentParams => write!(f, "Inconsistent proposal parameters"),
            GovernanceError::ExecutorNotAuthorized => write!(f, "Executor not authorized"),
            GovernanceError::PropositionPowerTooLow => write!(f, "Proposition power too low"),
            GovernanceError::ProposalNotFound => write!(f, "Proposal not found"),

            GovernanceError::VotingClosed => write!(f, "Voting closed"),
            GovernanceError::VoteAlreadySubmitted => write!(f, "Vote already submitted"),

            GovernanceError::InvalidSignature => write!(f, "Invalid signature"),
            GovernanceError::SignatureExpired => write!(f, "Signature expired"),
            GovernanceError::InvalidNonce => write!(f, "Invalid nonce"),

            GovernanceError::InvalidStateForQueue => write!(f, "Invalid state for queue"),
            GovernanceError::DuplicatedAction => write!(f, "Duplicated action"),
            GovernanceError::OnlyQueuedProposals => write!(f, "Only queued proposals can be executed"),
            GovernanceError::TimelockNotFinished => write!(f, "Timelock not finished"),
            GovernanceError::ActionNotQueued => write!(f, "Action not queued"),
            GovernanceError::ProposalExecuting => write!(f, "Proposal is being executed"),
            GovernanceError::OnlyBeforeExecuted => write!(f, "Only before executed"),
            GovernanceError::CancellationInvalid => write!(f, "Proposal cancellation invalid"),

            GovernanceError::NoGuardian => write!(f, "No guardian set"),
            GovernanceError::UnsupportedLocalAction => write!(f, "Unsupported governance action"),
            GovernanceError::InvalidLocalArguments => write!(f, "Invalid arguments for governance action"),
            GovernanceError::LocalActionNotAuthorized => {
                write!(f, "Only the owner executor may change governance settings")
            }

            GovernanceError::Overflow => write!(f, "Arithmetic overflow"),
            GovernanceError::InvalidValue => write!(f, "Action value must not be negative"),
        }
    }
}
