//! Payout scheme: ordered percentage shares for ranked finishers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::PERCENT_BASE;
use crate::error::{LeagueError, Result};

/// An ordered sequence of percentage shares. Index 0 is first place.
///
/// Every entry and the total must be ≤ 100. A scheme summing to exactly
/// 100 exhausts the pool when at least `len()` eligible players finish;
/// anything less leaves a remainder for the league to sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutScheme(Vec<u8>);

impl PayoutScheme {
    /// Validate and wrap a list of percentages.
    ///
    /// # Errors
    /// Returns [`LeagueError::InvalidPayoutScheme`] if any entry or the
    /// sum exceeds 100.
    pub fn new(percentages: Vec<u8>) -> Result<Self> {
        let mut sum: u32 = 0;
        for (place, &pct) in percentages.iter().enumerate() {
            if pct > PERCENT_BASE {
                return Err(LeagueError::InvalidPayoutScheme {
                    reason: format!("place {} share {pct} exceeds 100", place + 1),
                });
            }
            sum += u32::from(pct);
        }
        if sum > u32::from(PERCENT_BASE) {
            return Err(LeagueError::InvalidPayoutScheme {
                reason: format!("shares sum to {sum}, exceeding 100"),
            });
        }
        Ok(Self(percentages))
    }

    /// The percentage share for a 0-indexed rank, if the scheme covers it.
    #[must_use]
    pub fn share(&self, rank_index: usize) -> Option<u8> {
        self.0.get(rank_index).copied()
    }

    /// Number of paying places.
    #[must_use]
    pub fn places(&self) -> usize {
        self.0.len()
    }

    /// Sum of all shares, in percent.
    #[must_use]
    pub fn total_percent(&self) -> u32 {
        self.0.iter().map(|&p| u32::from(p)).sum()
    }

    /// Whether the scheme allocates the full pool across its places.
    #[must_use]
    pub fn is_exhaustive(&self) -> bool {
        self.total_percent() == 100
    }

    /// The raw percentages, first place first.
    #[must_use]
    pub fn percentages(&self) -> &[u8] {
        &self.0
    }

    /// The currency amount a given share carves out of a pool.
    #[must_use]
    pub fn amount_for(pool: Decimal, pct: u8) -> Decimal {
        pool * Decimal::from(pct) / Decimal::ONE_HUNDRED
    }
}
