//! Round configuration and per-player round state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_PLAYERS;
use crate::error::{LeagueError, Result};
use crate::ids::Principal;
use crate::scheme::PayoutScheme;

// ---------------------------------------------------------------------------
// RoundConfig
// ---------------------------------------------------------------------------

/// Immutable configuration for one round, fixed when the round starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Entry fee escrowed by every player.
    pub price_to_join: Decimal,
    /// Extra amount escrowed by players who opt into the ace pool.
    pub ace_pool_contribution: Decimal,
    /// Player cap for the round.
    pub max_players: usize,
    /// Number of holes each player scores.
    pub holes: usize,
    /// Percentage shares for ranked finishers.
    pub payout_scheme: PayoutScheme,
}

impl RoundConfig {
    /// Validate and build a round configuration. Failures surface in the
    /// order callers observe them: price, max players, holes, payout
    /// scheme, then the ace pool bound.
    ///
    /// # Errors
    /// One of `InvalidPrice`, `InvalidMaxPlayers`, `InvalidHoles`,
    /// `InvalidPayoutScheme`, `InvalidAcePoolContribution`.
    pub fn new(
        price_to_join: Decimal,
        ace_pool_contribution: Decimal,
        max_players: usize,
        holes: usize,
        payout_scheme: Vec<u8>,
    ) -> Result<Self> {
        if price_to_join <= Decimal::ZERO {
            return Err(LeagueError::InvalidPrice);
        }
        if max_players <= MIN_PLAYERS {
            return Err(LeagueError::InvalidMaxPlayers);
        }
        if holes == 0 {
            return Err(LeagueError::InvalidHoles);
        }
        let payout_scheme = PayoutScheme::new(payout_scheme)?;
        if ace_pool_contribution < Decimal::ZERO || ace_pool_contribution > price_to_join {
            return Err(LeagueError::InvalidAcePoolContribution);
        }
        Ok(Self {
            price_to_join,
            ace_pool_contribution,
            max_players,
            holes,
            payout_scheme,
        })
    }

    /// The exact payment a joining player must escrow.
    #[must_use]
    pub fn join_cost(&self, wants_ace_pool: bool) -> Decimal {
        if wants_ace_pool {
            self.price_to_join + self.ace_pool_contribution
        } else {
            self.price_to_join
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerRoundState
// ---------------------------------------------------------------------------

/// Per-(round, principal) record of entry, score submission, and forfeiture.
///
/// Forfeiting and submitting scores are each terminal: a player gets exactly
/// one of the two, enforced by the `scores_submitted` flag which both set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoundState {
    pub principal: Principal,
    /// Fixed at join time; input for the external ace-pool award hook.
    pub joined_ace_pool: bool,
    pub scores_submitted: bool,
    pub forfeited: bool,
    /// One entry per hole once submitted, empty otherwise.
    pub hole_scores: Vec<i32>,
    /// Sum of `hole_scores`; meaningful only when submitted and not forfeited.
    pub total_score: i64,
}

impl PlayerRoundState {
    /// Fresh state for a player who just joined.
    #[must_use]
    pub fn new(principal: Principal, joined_ace_pool: bool) -> Self {
        Self {
            principal,
            joined_ace_pool,
            scores_submitted: false,
            forfeited: false,
            hole_scores: Vec::new(),
            total_score: 0,
        }
    }

    /// Whether the player has reached a terminal state (submitted or forfeited).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.scores_submitted
    }

    /// Record submitted hole scores. Terminal.
    ///
    /// # Errors
    /// `AlreadySubmitted` if the player already submitted or forfeited.
    pub fn record_scores(&mut self, hole_scores: Vec<i32>) -> Result<()> {
        if self.scores_submitted {
            return Err(LeagueError::AlreadySubmitted);
        }
        self.total_score = hole_scores.iter().map(|&s| i64::from(s)).sum();
        self.hole_scores = hole_scores;
        self.scores_submitted = true;
        Ok(())
    }

    /// Mark the player as forfeited. Terminal: consumes the single
    /// score-submission opportunity with no score recorded.
    ///
    /// # Errors
    /// `AlreadySubmitted` if the player already submitted or forfeited.
    pub fn mark_forfeited(&mut self) -> Result<()> {
        if self.scores_submitted {
            return Err(LeagueError::AlreadySubmitted);
        }
        self.forfeited = true;
        self.scores_submitted = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RoundConfig {
        RoundConfig::new(
            Decimal::new(2, 0),
            Decimal::new(5, 1),
            3,
            3,
            vec![60, 40],
        )
        .unwrap()
    }

    #[test]
    fn zero_price_rejected() {
        let err = RoundConfig::new(Decimal::ZERO, Decimal::ZERO, 3, 3, vec![60, 40]).unwrap_err();
        assert!(matches!(err, LeagueError::InvalidPrice));
    }

    #[test]
    fn one_player_cap_rejected() {
        let err =
            RoundConfig::new(Decimal::new(2, 0), Decimal::ZERO, 1, 3, vec![60, 40]).unwrap_err();
        assert!(matches!(err, LeagueError::InvalidMaxPlayers));
    }

    #[test]
    fn zero_holes_rejected() {
        let err =
            RoundConfig::new(Decimal::new(2, 0), Decimal::ZERO, 3, 0, vec![60, 40]).unwrap_err();
        assert!(matches!(err, LeagueError::InvalidHoles));
    }

    #[test]
    fn bad_scheme_rejected() {
        let err =
            RoundConfig::new(Decimal::new(2, 0), Decimal::ZERO, 3, 3, vec![60, 60]).unwrap_err();
        assert!(matches!(err, LeagueError::InvalidPayoutScheme { .. }));
    }

    #[test]
    fn ace_contribution_above_price_rejected() {
        let err =
            RoundConfig::new(Decimal::new(2, 0), Decimal::new(3, 0), 3, 3, vec![60, 40])
                .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidAcePoolContribution));
    }

    #[test]
    fn price_checked_before_scheme() {
        // Both invalid: price wins, matching the order callers observe.
        let err = RoundConfig::new(Decimal::ZERO, Decimal::ZERO, 3, 3, vec![90, 90]).unwrap_err();
        assert!(matches!(err, LeagueError::InvalidPrice));
    }

    #[test]
    fn join_cost_includes_ace_pool() {
        let cfg = config();
        assert_eq!(cfg.join_cost(false), Decimal::new(2, 0));
        assert_eq!(cfg.join_cost(true), Decimal::new(25, 1));
    }

    #[test]
    fn record_scores_totals_and_is_terminal() {
        let mut player = PlayerRoundState::new(Principal::random(), false);
        player.record_scores(vec![3, 3, 4]).unwrap();
        assert_eq!(player.total_score, 10);
        assert!(player.is_finished());
        assert!(!player.forfeited);

        let err = player.record_scores(vec![1, 1, 1]).unwrap_err();
        assert!(matches!(err, LeagueError::AlreadySubmitted));
    }

    #[test]
    fn forfeit_is_terminal_both_ways() {
        let mut player = PlayerRoundState::new(Principal::random(), true);
        player.mark_forfeited().unwrap();
        assert!(player.forfeited);
        assert!(player.is_finished());
        assert!(player.hole_scores.is_empty());

        assert!(matches!(
            player.record_scores(vec![3]).unwrap_err(),
            LeagueError::AlreadySubmitted
        ));
        assert!(matches!(
            player.mark_forfeited().unwrap_err(),
            LeagueError::AlreadySubmitted
        ));
    }

    #[test]
    fn negative_hole_scores_sum() {
        // Relative-to-par scoring can go under zero.
        let mut player = PlayerRoundState::new(Principal::random(), false);
        player.record_scores(vec![-1, -2, 0]).unwrap();
        assert_eq!(player.total_score, -3);
    }
}
