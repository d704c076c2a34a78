//! The external value-transfer seam.
//!
//! Moving real currency out of escrow is not this engine's job. The
//! [`FundsGateway`] trait models the external primitive as an atomic,
//! failure-reporting transfer; the controller is handed an implementation
//! at construction and only ever invokes it from `claim_winnings`, after
//! the ledger entry has been zeroed.

use fairway_types::{Principal, Result};
use rust_decimal::Decimal;

/// Capability to push escrowed funds out to a principal.
///
/// Implementations must be atomic: either the full amount leaves escrow
/// or the call returns an error and nothing moved. The ledger relies on
/// that contract to restore claimable balances on failure.
pub trait FundsGateway {
    /// Transfer `amount` out of system escrow to `to`.
    ///
    /// # Errors
    /// Returns [`fairway_types::LeagueError::TransferFailed`] (or any
    /// gateway-specific error) if the transfer did not happen.
    fn transfer_out(&mut self, to: Principal, amount: Decimal) -> Result<()>;
}

/// In-memory gateway that always succeeds and records every transfer.
///
/// The reference implementation for tests and simulations; production
/// deployments supply their own payment-rail adapter.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    transfers: Vec<(Principal, Decimal)>,
}

impl RecordingGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every transfer performed, in order.
    #[must_use]
    pub fn transfers(&self) -> &[(Principal, Decimal)] {
        &self.transfers
    }

    /// Total amount transferred to a principal across all calls.
    #[must_use]
    pub fn total_to(&self, principal: Principal) -> Decimal {
        self.transfers
            .iter()
            .filter(|(p, _)| *p == principal)
            .map(|(_, amount)| *amount)
            .sum()
    }
}

impl FundsGateway for RecordingGateway {
    fn transfer_out(&mut self, to: Principal, amount: Decimal) -> Result<()> {
        self.transfers.push((to, amount));
        Ok(())
    }
}
