//! Escrow conservation invariant checker.
//!
//! Mathematical invariant enforced after every settlement cycle:
//! ```text
//! Σ(escrowed in) == Σ(claimable) + Σ(paid out) + held
//! ```
//! where `held` is everything still owned by the system on behalf of
//! leagues: open round pools, ace pools, and swept league balances.
//!
//! If this invariant ever breaks, funds were created or destroyed —
//! something has gone catastrophically wrong and the caller should halt.

use fairway_types::{LeagueError, Result};
use rust_decimal::Decimal;

/// Tracks cumulative escrow flows and validates conservation.
#[derive(Debug, Default)]
pub struct EscrowConservation {
    /// Total currency escrowed by joins since genesis.
    escrowed_in: Decimal,
    /// Total currency transferred out by successful claims since genesis.
    paid_out: Decimal,
}

impl EscrowConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an inbound escrow (a join payment).
    pub fn record_escrow(&mut self, amount: Decimal) {
        self.escrowed_in += amount;
    }

    /// Record an outbound transfer (a successful claim).
    pub fn record_payout(&mut self, amount: Decimal) {
        self.paid_out += amount;
    }

    /// Currency the system should still hold for leagues, given the
    /// current total of claimable winnings.
    #[must_use]
    pub fn expected_held(&self, claimable_total: Decimal) -> Decimal {
        self.escrowed_in - self.paid_out - claimable_total
    }

    /// Verify that the actual held amount (open pools + ace pools +
    /// league balances) matches the expected amount.
    ///
    /// # Errors
    /// Returns [`LeagueError::ConservationViolation`] if actual ≠ expected.
    pub fn verify(&self, claimable_total: Decimal, actual_held: Decimal) -> Result<()> {
        let expected = self.expected_held(claimable_total);
        if actual_held != expected {
            return Err(LeagueError::ConservationViolation {
                reason: format!(
                    "held {actual_held} != expected {expected} \
                     (escrowed_in={}, paid_out={}, claimable={claimable_total})",
                    self.escrowed_in, self.paid_out,
                ),
            });
        }
        Ok(())
    }

    /// Total escrowed in since genesis.
    #[must_use]
    pub fn total_escrowed(&self) -> Decimal {
        self.escrowed_in
    }

    /// Total paid out since genesis.
    #[must_use]
    pub fn total_paid_out(&self) -> Decimal {
        self.paid_out
    }
}
