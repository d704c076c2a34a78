//! # fairway-types
//!
//! Shared types, errors, and constants for the **Fairway** league
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Principal`], [`SettlementId`]
//! - **Round model**: [`RoundConfig`], [`PlayerRoundState`], [`PayoutScheme`]
//! - **Settlement model**: [`SettlementResult`], [`PayoutEntry`]
//! - **Errors**: [`LeagueError`] with `LG_ERR_` prefix codes
//! - **Constants**: percentage base and field-size limits

pub mod constants;
pub mod error;
pub mod ids;
pub mod round;
pub mod scheme;
pub mod settlement;

// Re-export all primary types at crate root for ergonomic imports:
//   use fairway_types::{Principal, RoundConfig, LeagueError, ...};

pub use error::*;
pub use ids::*;
pub use round::*;
pub use scheme::*;
pub use settlement::*;

// Constants are accessed via `fairway_types::constants::FOO`
// (not re-exported to avoid name collisions).
