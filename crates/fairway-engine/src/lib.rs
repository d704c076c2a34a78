//! # fairway-engine
//!
//! League registry, round lifecycle, payout computation, and the
//! settlement controller — the public operation surface of Fairway.
//!
//! ## Architecture
//!
//! [`SettlementController`] receives an operation + caller + funds,
//! validates against [`LeagueRegistry`] and [`Round`] invariants, mutates
//! state, and on round completion runs the pure payout computation, then
//! records the result into the winnings ledger for later pull-based
//! claims through the injected [`fairway_ledger::FundsGateway`].
//!
//! Money-correctness invariants (no funds created, lost, or double-paid)
//! and exclusivity guarantees (one open round per league, one terminal
//! action per player, exactly-once payout) live here.

pub mod controller;
pub mod payout;
pub mod registry;
pub mod round;

pub use controller::{LeagueInfo, RoundInfo, SettlementController};
pub use payout::{compute_distribution, Distribution};
pub use registry::{League, LeagueRegistry};
pub use round::Round;
