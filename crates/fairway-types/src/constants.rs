//! System-wide constants for the Fairway settlement engine.

/// Payout percentages are expressed against this base.
pub const PERCENT_BASE: u8 = 100;

/// Smallest competitive field: a round needs strictly more players than this.
pub const MIN_PLAYERS: usize = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Fairway";
