//! Pure payout computation for a finished round.
//!
//! Stroke-play ranking: lower total score places higher. Forfeited
//! players are filtered out before ranking; their entry fees stay in the
//! pool and are distributed among the remaining places. Ties resolve by
//! join order — the stable sort keeps the earlier joiner ahead.
//!
//! The computation is pure: it reads the round and produces a
//! [`Distribution`], leaving every mutation to the controller's commit
//! phase. Re-running it on the same round yields the same result on
//! every replay, which is what makes settlement deterministic.

use fairway_types::{PayoutEntry, PayoutScheme};
use rust_decimal::Decimal;

use crate::round::Round;

/// The computed division of a round's pool across ranked players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// Payouts in rank order (1-indexed ranks).
    pub entries: Vec<PayoutEntry>,
    /// Pool not allocated by the scheme: schemes summing below 100, or
    /// fewer eligible players than paying places.
    pub remainder: Decimal,
}

/// Compute the distribution for a round whose players have all finished.
///
/// Rank *i* (1-indexed) receives `pool * scheme[i-1] / 100`; ranks beyond
/// the scheme receive nothing. The remainder is whatever the entries do
/// not cover, down to zero for an exhaustive scheme with a full field.
#[must_use]
pub fn compute_distribution(round: &Round) -> Distribution {
    // Eligible players keep their join-order index so the stable sort
    // breaks score ties in favor of the earlier joiner.
    let mut eligible: Vec<_> = round
        .players
        .iter()
        .filter(|p| !p.forfeited)
        .collect();
    eligible.sort_by_key(|p| p.total_score);

    let pool = round.pool_balance;
    let scheme = &round.config.payout_scheme;

    let mut entries = Vec::new();
    let mut allocated = Decimal::ZERO;
    for (index, player) in eligible.iter().enumerate() {
        let Some(pct) = scheme.share(index) else {
            break;
        };
        let amount = PayoutScheme::amount_for(pool, pct);
        allocated += amount;
        entries.push(PayoutEntry {
            principal: player.principal,
            rank: u32::try_from(index + 1).unwrap_or(u32::MAX),
            amount,
        });
    }

    Distribution {
        entries,
        remainder: pool - allocated,
    }
}
