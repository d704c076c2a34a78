//! In-memory winnings ledger: per-principal claimable balances.
//!
//! The ledger is the one resource mutated by several operations: joins
//! escrow payments into it, settlement credits winnings, and claims debit
//! them. Claims follow the zero-before-transfer rule — the entry is
//! removed *before* the external gateway is invoked, and restored only if
//! the gateway reports failure. A reentrant second claim therefore always
//! observes a zero balance.
//!
//! Lifecycle of one unit of currency:
//! 1. `record_escrow` → a join payment enters system escrow
//! 2. `credit` → settlement books part of the pool to a winner
//! 3. `claim` → the winner pulls funds out through the gateway

use std::collections::HashMap;

use fairway_types::{LeagueError, Principal, Result};
use rust_decimal::Decimal;

use crate::conservation::EscrowConservation;
use crate::gateway::FundsGateway;

/// Tracks claimable winnings per principal, globally across leagues and
/// rounds, plus cumulative escrow flow for conservation auditing.
#[derive(Debug, Default)]
pub struct WinningsLedger {
    /// `Principal → claimable balance`. Absent means zero.
    claimable: HashMap<Principal, Decimal>,
    conservation: EscrowConservation,
}

impl WinningsLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a join payment entering system escrow.
    pub fn record_escrow(&mut self, amount: Decimal) {
        self.conservation.record_escrow(amount);
    }

    /// Credit settlement winnings to a principal. Infallible book entry:
    /// settlement validates everything before crediting, so the commit
    /// phase cannot abort halfway.
    pub fn credit(&mut self, principal: Principal, amount: Decimal) {
        if amount.is_zero() {
            return;
        }
        *self.claimable.entry(principal).or_insert(Decimal::ZERO) += amount;
    }

    /// Claimable balance for a principal. Zero if absent.
    #[must_use]
    pub fn pending(&self, principal: Principal) -> Decimal {
        self.claimable
            .get(&principal)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Claim the caller's full balance: zero the entry, then transfer out.
    ///
    /// If the gateway fails, the entry is restored to its exact pre-claim
    /// value and the error is surfaced — no funds lost, no silent success.
    ///
    /// # Errors
    /// - `NothingToClaim` if the balance is zero
    /// - the gateway's error if the external transfer fails
    pub fn claim(
        &mut self,
        principal: Principal,
        gateway: &mut impl FundsGateway,
    ) -> Result<Decimal> {
        let Some(amount) = self.claimable.remove(&principal) else {
            return Err(LeagueError::NothingToClaim);
        };
        if amount.is_zero() {
            return Err(LeagueError::NothingToClaim);
        }

        // Entry is already zeroed; a reentrant claim now sees nothing.
        if let Err(err) = gateway.transfer_out(principal, amount) {
            tracing::warn!(
                principal = %principal,
                amount = %amount,
                error = %err,
                "Claim transfer failed, restoring ledger entry"
            );
            self.claimable.insert(principal, amount);
            return Err(err);
        }

        self.conservation.record_payout(amount);
        Ok(amount)
    }

    /// Sum of all claimable balances.
    #[must_use]
    pub fn claimable_total(&self) -> Decimal {
        self.claimable.values().copied().sum()
    }

    /// Number of principals with a non-zero claimable balance.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.claimable.len()
    }

    /// Verify escrow conservation against the amount the system should
    /// still hold on behalf of leagues (open pools + ace pools + league
    /// balances).
    ///
    /// # Errors
    /// Returns [`LeagueError::ConservationViolation`] on mismatch.
    pub fn verify_conservation(&self, actual_held: Decimal) -> Result<()> {
        self.conservation
            .verify(self.claimable_total(), actual_held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::RecordingGateway;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    /// Gateway that refuses every transfer, for rollback tests.
    struct FailingGateway;

    impl FundsGateway for FailingGateway {
        fn transfer_out(&mut self, _to: Principal, _amount: Decimal) -> Result<()> {
            Err(LeagueError::TransferFailed {
                reason: "gateway offline".into(),
            })
        }
    }

    #[test]
    fn credit_and_pending() {
        let mut ledger = WinningsLedger::new();
        let alice = Principal::random();

        ledger.credit(alice, dec(3));
        ledger.credit(alice, dec(2));
        assert_eq!(ledger.pending(alice), dec(5));
        assert_eq!(ledger.pending(Principal::random()), Decimal::ZERO);
    }

    #[test]
    fn zero_credit_creates_no_entry() {
        let mut ledger = WinningsLedger::new();
        ledger.credit(Principal::random(), Decimal::ZERO);
        assert_eq!(ledger.entry_count(), 0);
    }

    #[test]
    fn claim_transfers_and_zeroes() {
        let mut ledger = WinningsLedger::new();
        let mut gateway = RecordingGateway::new();
        let alice = Principal::random();

        ledger.record_escrow(dec(4));
        ledger.credit(alice, dec(4));

        let transferred = ledger.claim(alice, &mut gateway).unwrap();
        assert_eq!(transferred, dec(4));
        assert_eq!(ledger.pending(alice), Decimal::ZERO);
        assert_eq!(gateway.total_to(alice), dec(4));

        // All escrow left the system; nothing held, nothing claimable.
        ledger.verify_conservation(Decimal::ZERO).unwrap();
    }

    #[test]
    fn claim_with_zero_balance_fails() {
        let mut ledger = WinningsLedger::new();
        let mut gateway = RecordingGateway::new();
        let err = ledger.claim(Principal::random(), &mut gateway).unwrap_err();
        assert!(matches!(err, LeagueError::NothingToClaim));
        assert!(gateway.transfers().is_empty());
    }

    #[test]
    fn second_claim_finds_nothing() {
        let mut ledger = WinningsLedger::new();
        let mut gateway = RecordingGateway::new();
        let alice = Principal::random();

        ledger.record_escrow(dec(4));
        ledger.credit(alice, dec(4));
        ledger.claim(alice, &mut gateway).unwrap();

        let err = ledger.claim(alice, &mut gateway).unwrap_err();
        assert!(matches!(err, LeagueError::NothingToClaim));
        // Exactly one transfer happened.
        assert_eq!(gateway.transfers().len(), 1);
    }

    #[test]
    fn failed_transfer_restores_entry() {
        let mut ledger = WinningsLedger::new();
        let alice = Principal::random();

        ledger.record_escrow(dec(4));
        ledger.credit(alice, dec(4));

        let err = ledger.claim(alice, &mut FailingGateway).unwrap_err();
        assert!(matches!(err, LeagueError::TransferFailed { .. }));

        // Balance restored exactly; a later claim still works.
        assert_eq!(ledger.pending(alice), dec(4));
        let mut gateway = RecordingGateway::new();
        assert_eq!(ledger.claim(alice, &mut gateway).unwrap(), dec(4));
    }

    #[test]
    fn conservation_tracks_escrow_through_claim() {
        let mut ledger = WinningsLedger::new();
        let mut gateway = RecordingGateway::new();
        let alice = Principal::random();

        // 6 escrowed, 4 credited to alice: system still holds 2.
        ledger.record_escrow(dec(6));
        ledger.credit(alice, dec(4));
        ledger.verify_conservation(dec(2)).unwrap();

        // After the claim the system still holds the same 2.
        ledger.claim(alice, &mut gateway).unwrap();
        ledger.verify_conservation(dec(2)).unwrap();

        // A wrong held amount must be caught.
        assert!(ledger.verify_conservation(dec(3)).is_err());
    }
}
