//! Live state for one round: escrow totals and the ordered player list.
//!
//! Every mutating method validates all preconditions before touching any
//! field, so a returned error always means "nothing changed".

use fairway_types::{LeagueError, PlayerRoundState, Principal, Result, RoundConfig};
use rust_decimal::Decimal;

/// One priced competition instance within a league.
#[derive(Debug)]
pub struct Round {
    pub config: RoundConfig,
    pub is_open: bool,
    /// Sum of entry fees over joined players. Excludes ace contributions.
    pub pool_balance: Decimal,
    /// Sum of ace contributions over ace-opted players.
    pub ace_pool_balance: Decimal,
    /// Insertion order is join order; ranking ties resolve by it.
    pub players: Vec<PlayerRoundState>,
    /// Players who have submitted scores or forfeited.
    pub finished_count: usize,
}

impl Round {
    /// A fresh open round with zero balances and no players.
    #[must_use]
    pub fn new(config: RoundConfig) -> Self {
        Self {
            config,
            is_open: true,
            pool_balance: Decimal::ZERO,
            ace_pool_balance: Decimal::ZERO,
            players: Vec::new(),
            finished_count: 0,
        }
    }

    /// Index of a principal in the join-ordered player list.
    #[must_use]
    pub fn player_index(&self, principal: Principal) -> Option<usize> {
        self.players.iter().position(|p| p.principal == principal)
    }

    /// The player state for a principal, if joined.
    #[must_use]
    pub fn player(&self, principal: Principal) -> Option<&PlayerRoundState> {
        self.players.iter().find(|p| p.principal == principal)
    }

    fn player_mut(&mut self, principal: Principal) -> Result<&mut PlayerRoundState> {
        self.players
            .iter_mut()
            .find(|p| p.principal == principal)
            .ok_or(LeagueError::NotInRound)
    }

    /// Admit a player who paid `payment`.
    ///
    /// The entry fee goes to the pool; the ace contribution, if opted,
    /// goes to the ace pool and never touches the main pool.
    ///
    /// # Errors
    /// `RoundNotStarted`, `AlreadyJoined`, `RoundFull`, or one of the two
    /// `IncorrectFunds` kinds when the payment is not exact.
    pub fn join(
        &mut self,
        principal: Principal,
        wants_ace_pool: bool,
        payment: Decimal,
    ) -> Result<()> {
        if !self.is_open {
            return Err(LeagueError::RoundNotStarted);
        }
        if self.player_index(principal).is_some() {
            return Err(LeagueError::AlreadyJoined);
        }
        if self.players.len() >= self.config.max_players {
            return Err(LeagueError::RoundFull);
        }
        let expected = self.config.join_cost(wants_ace_pool);
        if payment != expected {
            return Err(if wants_ace_pool {
                LeagueError::IncorrectFundsWithAcePool {
                    expected,
                    paid: payment,
                }
            } else {
                LeagueError::IncorrectFunds {
                    expected,
                    paid: payment,
                }
            });
        }

        self.players
            .push(PlayerRoundState::new(principal, wants_ace_pool));
        self.pool_balance += self.config.price_to_join;
        if wants_ace_pool {
            self.ace_pool_balance += self.config.ace_pool_contribution;
        }
        Ok(())
    }

    /// Forfeit: terminal, no score recorded, entry fee stays in the pool.
    ///
    /// # Errors
    /// `NoOpenRound`, `NotInRound`, or `AlreadySubmitted`.
    pub fn forfeit(&mut self, principal: Principal) -> Result<()> {
        if !self.is_open {
            return Err(LeagueError::NoOpenRound);
        }
        self.player_mut(principal)?.mark_forfeited()?;
        self.finished_count += 1;
        Ok(())
    }

    /// Record a player's hole scores. Terminal.
    ///
    /// # Errors
    /// `NoOpenRound`, `NotInRound`, `AlreadySubmitted`, or
    /// `InvalidScoreArraySize` when the array length differs from the
    /// round's hole count.
    pub fn submit_scores(&mut self, principal: Principal, hole_scores: Vec<i32>) -> Result<()> {
        if !self.is_open {
            return Err(LeagueError::NoOpenRound);
        }
        let holes = self.config.holes;
        let player = self.player_mut(principal)?;
        if player.scores_submitted {
            return Err(LeagueError::AlreadySubmitted);
        }
        if hole_scores.len() != holes {
            return Err(LeagueError::InvalidScoreArraySize {
                expected: holes,
                got: hole_scores.len(),
            });
        }
        player.record_scores(hole_scores)?;
        self.finished_count += 1;
        Ok(())
    }

    /// Whether every joined player has submitted or forfeited.
    #[must_use]
    pub fn all_finished(&self) -> bool {
        self.finished_count == self.players.len()
    }

    /// Close the round after settlement: flag it and zero the pool.
    /// The ace pool balance is deliberately left in place.
    pub fn close(&mut self) {
        self.is_open = false;
        self.pool_balance = Decimal::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> Round {
        Round::new(
            RoundConfig::new(Decimal::new(2, 0), Decimal::new(5, 1), 3, 3, vec![60, 40]).unwrap(),
        )
    }

    #[test]
    fn join_accumulates_pool_and_ace_pool() {
        let mut r = round();
        let a = Principal::random();
        let b = Principal::random();

        r.join(a, false, Decimal::new(2, 0)).unwrap();
        r.join(b, true, Decimal::new(25, 1)).unwrap();

        assert_eq!(r.players.len(), 2);
        assert_eq!(r.pool_balance, Decimal::new(4, 0));
        assert_eq!(r.ace_pool_balance, Decimal::new(5, 1));
        assert_eq!(r.player_index(a), Some(0));
        assert_eq!(r.player_index(b), Some(1));
    }

    #[test]
    fn join_twice_rejected() {
        let mut r = round();
        let a = Principal::random();
        r.join(a, false, Decimal::new(2, 0)).unwrap();
        let err = r.join(a, false, Decimal::new(2, 0)).unwrap_err();
        assert!(matches!(err, LeagueError::AlreadyJoined));
    }

    #[test]
    fn join_full_round_rejected() {
        let mut r = round();
        for _ in 0..3 {
            r.join(Principal::random(), false, Decimal::new(2, 0))
                .unwrap();
        }
        let err = r
            .join(Principal::random(), false, Decimal::new(2, 0))
            .unwrap_err();
        assert!(matches!(err, LeagueError::RoundFull));
        assert_eq!(r.pool_balance, Decimal::new(6, 0));
    }

    #[test]
    fn wrong_payment_rejected_without_mutation() {
        let mut r = round();
        let a = Principal::random();

        let err = r.join(a, false, Decimal::new(20, 0)).unwrap_err();
        assert!(matches!(err, LeagueError::IncorrectFunds { .. }));

        // Paying only the base price while opting into the ace pool is the
        // distinguished ace-pool variant.
        let err = r.join(a, true, Decimal::new(2, 0)).unwrap_err();
        assert!(matches!(err, LeagueError::IncorrectFundsWithAcePool { .. }));

        assert!(r.players.is_empty());
        assert_eq!(r.pool_balance, Decimal::ZERO);
        assert_eq!(r.ace_pool_balance, Decimal::ZERO);
    }

    #[test]
    fn forfeit_counts_as_finished_and_keeps_pool() {
        let mut r = round();
        let a = Principal::random();
        r.join(a, false, Decimal::new(2, 0)).unwrap();

        r.forfeit(a).unwrap();
        assert_eq!(r.finished_count, 1);
        assert!(r.all_finished());
        assert_eq!(r.pool_balance, Decimal::new(2, 0));

        let err = r.submit_scores(a, vec![3, 3, 3]).unwrap_err();
        assert!(matches!(err, LeagueError::AlreadySubmitted));
    }

    #[test]
    fn forfeit_by_stranger_rejected() {
        let mut r = round();
        r.join(Principal::random(), false, Decimal::new(2, 0))
            .unwrap();
        let err = r.forfeit(Principal::random()).unwrap_err();
        assert!(matches!(err, LeagueError::NotInRound));
        assert_eq!(r.finished_count, 0);
    }

    #[test]
    fn submit_wrong_array_size_rejected() {
        let mut r = round();
        let a = Principal::random();
        r.join(a, false, Decimal::new(2, 0)).unwrap();

        let err = r.submit_scores(a, vec![3, 3]).unwrap_err();
        assert!(matches!(
            err,
            LeagueError::InvalidScoreArraySize {
                expected: 3,
                got: 2
            }
        ));
        assert_eq!(r.finished_count, 0);
    }

    #[test]
    fn submit_totals_scores() {
        let mut r = round();
        let a = Principal::random();
        r.join(a, false, Decimal::new(2, 0)).unwrap();

        r.submit_scores(a, vec![3, 3, 4]).unwrap();
        let player = r.player(a).unwrap();
        assert_eq!(player.total_score, 10);
        assert!(player.scores_submitted);
        assert_eq!(r.finished_count, 1);
    }

    #[test]
    fn closed_round_refuses_everything() {
        let mut r = round();
        let a = Principal::random();
        r.join(a, false, Decimal::new(2, 0)).unwrap();
        r.submit_scores(a, vec![3, 3, 4]).unwrap();
        r.close();

        assert!(!r.is_open);
        assert_eq!(r.pool_balance, Decimal::ZERO);
        assert!(matches!(
            r.join(Principal::random(), false, Decimal::new(2, 0))
                .unwrap_err(),
            LeagueError::RoundNotStarted
        ));
        assert!(matches!(
            r.forfeit(a).unwrap_err(),
            LeagueError::NoOpenRound
        ));
        assert!(matches!(
            r.submit_scores(a, vec![1, 1, 1]).unwrap_err(),
            LeagueError::NoOpenRound
        ));
    }
}
