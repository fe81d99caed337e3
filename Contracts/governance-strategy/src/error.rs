use core::fmt;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StrategyError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NoPowerTokens = 3,
    InvalidLedger = 4,
    Overflow = 5,
}

impl fmt::Display for StrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyError::AlreadyInitialized => write!(f, "Strategy is already initialized"),
            StrategyError::NotInitialized => write!(f, "Strategy is not initialized"),
            StrategyError::NoPowerTokens => write!(f, "At least one power token is required"),
            StrategyError::InvalidLedger => write!(f, "Invalid ledger number"),
            StrategyError::Overflow => write!(f, "Arithmetic overflow"),
        }
    }
}
