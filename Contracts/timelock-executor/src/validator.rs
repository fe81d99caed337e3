//! Threshold arithmetic behind proposal creation, cancellation and success.
//!
//! All thresholds are basis points of `ONE_HUNDRED_WITH_PRECISION`. Votes and
//! supplies are compared in scaled form so no precision is lost to division.

use governance_interface::{VoteTally, ONE_HUNDRED_WITH_PRECISION};
use crate::error::ExecutorError;

/// Proposition power a creator must hold: `floor(supply * threshold / 10_000)`.
pub fn minimum_proposition_power(total_supply: i128, threshold_bps: u32) -> Result<i128, ExecutorError> {
    total_supply
        .checked_mul(threshold_bps as i128)
        .map(|scaled| scaled / ONE_HUNDRED_WITH_PRECISION)
        .ok_or(ExecutorError::Overflow)
}

/// Smallest number of cast votes that satisfies the quorum.
pub fn minimum_voting_power(voting_supply: i128, quorum_bps: u32) -> Result<i128, ExecutorError> {
    let scaled = voting_supply
        .checked_mul(quorum_bps as i128)
        .ok_or(ExecutorError::Overflow)?;
    scaled
        .checked_add(ONE_HUNDRED_WITH_PRECISION - 1)
        .map(|rounded| rounded / ONE_HUNDRED_WITH_PRECISION)
        .ok_or(ExecutorError::Overflow)
}

/// Total cast votes (for + against) reach `quorum_bps` of the voting supply.
pub fn quorum_reached(tally: &VoteTally, quorum_bps: u32) -> Result<bool, ExecutorError> {
    let cast = tally
        .for_votes
        .checked_add(tally.against_votes)
        .ok_or(ExecutorError::Overflow)?;
    let cast_scaled = cast
        .checked_mul(ONE_HUNDRED_WITH_PRECISION)
        .ok_or(ExecutorError::Overflow)?;
    let required = tally
        .voting_supply
        .checked_mul(quorum_bps as i128)
        .ok_or(ExecutorError::Overflow)?;
    Ok(cast_scaled >= required)
}

/// For-votes exceed against-votes by at least `differential_bps` of supply.
pub fn differential_reached(tally: &VoteTally, differential_bps: u32) -> Result<bool, ExecutorError> {
    let margin = tally
        .for_votes
        .checked_sub(tally.against_votes)
        .ok_or(ExecutorError::Overflow)?;
    let margin_scaled = margin
        .checked_mul(ONE_HUNDRED_WITH_PRECISION)
        .ok_or(ExecutorError::Overflow)?;
    let required = tally
        .voting_supply
        .checked_mul(differential_bps as i128)
        .ok_or(ExecutorError::Overflow)?;
    Ok(margin_scaled >= required)
}

#[cfg(test)]
mod test {
    use super::*;

    fn tally(for_votes: i128, against_votes: i128, voting_supply: i128) -> VoteTally {
        VoteTally { for_votes, against_votes, voting_supply }
    }

    #[test]
    fn test_minimum_proposition_power_rounds_down() {
        // 1% of 1_050
        assert_eq!(minimum_proposition_power(1_050, 100).unwrap(), 10);
        assert_eq!(minimum_proposition_power(0, 100).unwrap(), 0);
    }

    #[test]
    fn test_minimum_voting_power_rounds_up() {
        // 20% of 1_001 = 200.2 -> 201
        assert_eq!(minimum_voting_power(1_001, 2_000).unwrap(), 201);
        assert_eq!(minimum_voting_power(1_000, 2_000).unwrap(), 200);
    }

    #[test]
    fn test_quorum_counts_both_sides() {
        // supply 1_000, quorum 20% -> 200 votes needed
        assert!(quorum_reached(&tally(150, 50, 1_000), 2_000).unwrap());
        assert!(!quorum_reached(&tally(150, 49, 1_000), 2_000).unwrap());
    }

    #[test]
    fn test_quorum_agrees_with_minimum_voting_power() {
        let needed = minimum_voting_power(1_001, 2_000).unwrap();
        assert!(quorum_reached(&tally(needed, 0, 1_001), 2_000).unwrap());
        assert!(!quorum_reached(&tally(needed - 1, 0, 1_001), 2_000).unwrap());
    }

    #[test]
    fn test_differential_requires_margin_of_supply() {
        // supply 1_000, differential 5% -> margin of 50
        assert!(differential_reached(&tally(300, 250, 1_000), 500).unwrap());
        assert!(!differential_reached(&tally(300, 251, 1_000), 500).unwrap());
        assert!(!differential_reached(&tally(100, 200, 1_000), 0).unwrap());
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            quorum_reached(&tally(i128::MAX, 1, 10), 100),
            Err(ExecutorError::Overflow)
        );
        assert_eq!(
            minimum_proposition_power(i128::MAX, 2),
            Err(ExecutorError::Overflow)
        );
    }
}
