//! Error types for the Fairway settlement engine.
//!
//! All errors use the `LG_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: League errors
//! - 2xx: Round configuration errors
//! - 3xx: Join errors
//! - 4xx: Play errors (forfeit / score submission)
//! - 5xx: Settlement errors
//! - 6xx: Claim errors
//! - 9xx: Invariant / internal errors
//!
//! Every message is stable: callers pattern-match on the variant, and
//! operators grep logs for the human-readable phrase.

use rust_decimal::Decimal;
use thiserror::Error;

/// Central error enum for all Fairway operations.
///
/// Each variant is a caller-correctable precondition failure. An operation
/// that returns an error has mutated no state.
#[derive(Debug, Error)]
pub enum LeagueError {
    // =================================================================
    // League Errors (1xx)
    // =================================================================
    /// A league with this name is already registered.
    #[error("LG_ERR_100: League name already exists: {0}")]
    DuplicateName(String),

    /// No league with this name is registered.
    #[error("LG_ERR_101: League name does not exist: {0}")]
    UnknownLeague(String),

    /// Only the recorded league owner may start or finish rounds.
    #[error("LG_ERR_102: Only the league owner can start or finish a round")]
    NotLeagueOwner,

    // =================================================================
    // Round Configuration Errors (2xx)
    // =================================================================
    /// The league already has an open round.
    #[error("LG_ERR_200: Round already open")]
    RoundAlreadyOpen,

    /// The entry price must be positive.
    #[error("LG_ERR_201: Price to join must be positive, non-zero")]
    InvalidPrice,

    /// A round needs at least two players to be a competition.
    #[error("LG_ERR_202: Max number of players must be more than one")]
    InvalidMaxPlayers,

    /// A round needs at least one hole.
    #[error("LG_ERR_203: Need a positive, non-zero number of holes for the round")]
    InvalidHoles,

    /// Payout scheme entries and their sum must not exceed 100 percent.
    #[error("LG_ERR_204: Payout scheme invalid, all places must be less than or equal to 100: {reason}")]
    InvalidPayoutScheme { reason: String },

    /// The ace pool contribution may not exceed the price to join.
    #[error("LG_ERR_205: Ace pool contribution cannot exceed the price to join")]
    InvalidAcePoolContribution,

    // =================================================================
    // Join Errors (3xx)
    // =================================================================
    /// No round is open for joining.
    #[error("LG_ERR_300: A round has not been started")]
    RoundNotStarted,

    /// The caller has already joined this round.
    #[error("LG_ERR_301: Player has already joined this round")]
    AlreadyJoined,

    /// The round has reached its player cap.
    #[error("LG_ERR_302: Round is full")]
    RoundFull,

    /// The payment did not exactly match the price to join.
    #[error("LG_ERR_303: Incorrect funds to join round: expected {expected}, got {paid}")]
    IncorrectFunds { expected: Decimal, paid: Decimal },

    /// The payment did not exactly match price to join plus ace pool contribution.
    #[error("LG_ERR_304: Incorrect funds to join round + ace pool: expected {expected}, got {paid}")]
    IncorrectFundsWithAcePool { expected: Decimal, paid: Decimal },

    // =================================================================
    // Play Errors (4xx)
    // =================================================================
    /// No round is currently open for this league.
    #[error("LG_ERR_400: No round is currently open")]
    NoOpenRound,

    /// The caller is not among this round's players.
    #[error("LG_ERR_401: Player is not in this round")]
    NotInRound,

    /// The caller has already submitted scores or forfeited.
    #[error("LG_ERR_402: Player has already submitted scores or forfeited")]
    AlreadySubmitted,

    /// The submitted score array length must equal the round's hole count.
    #[error("LG_ERR_403: Score array size mismatch: expected {expected} holes, got {got}")]
    InvalidScoreArraySize { expected: usize, got: usize },

    // =================================================================
    // Settlement Errors (5xx)
    // =================================================================
    /// Settlement requires every joined player to have finished.
    #[error("LG_ERR_500: Payout conditions not met: {finished} of {joined} players finished")]
    PayoutConditionsNotMet { finished: usize, joined: usize },

    // =================================================================
    // Claim Errors (6xx)
    // =================================================================
    /// The caller has no claimable winnings.
    #[error("LG_ERR_600: No winnings to claim")]
    NothingToClaim,

    /// The external transfer failed; the ledger entry was restored.
    #[error("LG_ERR_601: External transfer failed: {reason}")]
    TransferFailed { reason: String },

    // =================================================================
    // Invariant / Internal (9xx)
    // =================================================================
    /// Escrow conservation invariant violated — critical safety alert.
    #[error("LG_ERR_900: Escrow conservation violation: {reason}")]
    ConservationViolation { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LeagueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = LeagueError::DuplicateName("sunday-league".into());
        let msg = format!("{err}");
        assert!(msg.starts_with("LG_ERR_100"), "Got: {msg}");
        assert!(msg.contains("sunday-league"));
    }

    #[test]
    fn incorrect_funds_display() {
        let err = LeagueError::IncorrectFunds {
            expected: Decimal::new(2, 0),
            paid: Decimal::new(15, 1),
        };
        let msg = format!("{err}");
        assert!(msg.contains("LG_ERR_303"));
        assert!(msg.contains('2'));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn ace_pool_variant_is_distinguished() {
        let plain = LeagueError::IncorrectFunds {
            expected: Decimal::new(2, 0),
            paid: Decimal::ONE,
        };
        let ace = LeagueError::IncorrectFundsWithAcePool {
            expected: Decimal::new(25, 1),
            paid: Decimal::new(2, 0),
        };
        assert!(format!("{ace}").contains("+ ace pool"));
        assert!(!format!("{plain}").contains("+ ace pool"));
    }

    #[test]
    fn all_errors_have_lg_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(LeagueError::NotLeagueOwner),
            Box::new(LeagueError::RoundAlreadyOpen),
            Box::new(LeagueError::RoundNotStarted),
            Box::new(LeagueError::AlreadySubmitted),
            Box::new(LeagueError::NothingToClaim),
            Box::new(LeagueError::PayoutConditionsNotMet {
                finished: 1,
                joined: 3,
            }),
            Box::new(LeagueError::TransferFailed {
                reason: "gateway offline".into(),
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("LG_ERR_"),
                "Error missing LG_ERR_ prefix: {msg}"
            );
        }
    }
}
