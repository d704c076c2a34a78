//! # fairway-ledger
//!
//! **Escrow plane**: claimable winnings, conservation auditing, and the
//! external value-transfer seam.
//!
//! ## Architecture
//!
//! The ledger is process-wide shared state with exactly three writers,
//! all driven by the settlement controller:
//! 1. Joins escrow entry fees (`record_escrow`)
//! 2. Settlement credits winners (`credit`)
//! 3. Claims debit winners through a [`FundsGateway`] (`claim`)
//!
//! Claims are pull-based and reentrancy-safe: the ledger entry is zeroed
//! before the external transfer runs, and restored if it fails.

pub mod conservation;
pub mod gateway;
pub mod winnings;

pub use conservation::EscrowConservation;
pub use gateway::{FundsGateway, RecordingGateway};
pub use winnings::WinningsLedger;
