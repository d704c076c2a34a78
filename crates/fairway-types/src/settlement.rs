//! Settlement results — the durable record a finished round emits.
//!
//! A round is destroyed (its slot reused) when the next round starts;
//! who won what survives only through these records, so they carry
//! everything an audit trail needs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{Principal, SettlementId};

/// One ranked payout within a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutEntry {
    pub principal: Principal,
    /// 1-indexed finishing place among non-forfeited players.
    pub rank: u32,
    /// Amount credited to the player's winnings ledger entry.
    pub amount: Decimal,
}

/// The emitted record of one round settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Deterministic per (league, round sequence).
    pub id: SettlementId,
    pub league: String,
    /// Payouts in rank order. Forfeited players never appear.
    pub payouts: Vec<PayoutEntry>,
    /// Pool left unallocated by the scheme, swept into the league balance.
    pub remainder: Decimal,
    /// Ace pool carried on the league; its disposition is external.
    pub ace_pool_balance: Decimal,
    pub settled_at: DateTime<Utc>,
}

impl SettlementResult {
    /// Total amount credited to players by this settlement.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.payouts.iter().map(|p| p.amount).sum()
    }
}
