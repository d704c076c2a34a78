//! The settlement controller: Fairway's public operation surface.
//!
//! Every operation takes the caller as an explicit [`Principal`] — there
//! is no ambient identity. The controller owns all shared state (registry
//! and ledger) behind `&mut self`, giving single-writer command-log
//! semantics: one operation fully validates and commits, or fails with a
//! specific [`LeagueError`] having mutated nothing.
//!
//! The external transfer capability is injected at construction and only
//! invoked from `claim_winnings`, never mid-mutation of shared state.

use chrono::Utc;
use fairway_ledger::{FundsGateway, WinningsLedger};
use fairway_types::{
    LeagueError, PlayerRoundState, Principal, Result, RoundConfig, SettlementId, SettlementResult,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payout::compute_distribution;
use crate::registry::LeagueRegistry;
use crate::round::Round;

/// Read-only view of a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueInfo {
    pub name: String,
    pub owner: Principal,
    pub balance: Decimal,
    pub ace_pool_balance: Decimal,
    pub rounds_started: u64,
    pub round_open: bool,
}

/// Read-only view of a league's current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    pub price_to_join: Decimal,
    pub ace_pool_contribution: Decimal,
    pub max_players: usize,
    pub holes: usize,
    pub payout_scheme: Vec<u8>,
    pub is_open: bool,
    pub pool_balance: Decimal,
    pub ace_pool_balance: Decimal,
    pub player_count: usize,
    pub finished_count: usize,
}

/// Orchestrates league rounds: escrow on join, ranking and payout on
/// finish, pull-based claims through the injected gateway.
pub struct SettlementController<G: FundsGateway> {
    registry: LeagueRegistry,
    ledger: WinningsLedger,
    gateway: G,
}

impl<G: FundsGateway> SettlementController<G> {
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            registry: LeagueRegistry::new(),
            ledger: WinningsLedger::new(),
            gateway,
        }
    }

    // =================================================================
    // League lifecycle
    // =================================================================

    /// Register a league owned by the caller. Returns the recorded owner.
    ///
    /// # Errors
    /// `DuplicateName` if the name is taken.
    pub fn create_league(&mut self, name: &str, caller: Principal) -> Result<Principal> {
        let league = self.registry.create(name, caller)?;
        tracing::info!(league = %league.name, owner = %league.owner, "League created");
        Ok(league.owner)
    }

    /// Open a new round for a league.
    ///
    /// # Errors
    /// In order: `UnknownLeague`, `NotLeagueOwner`, `RoundAlreadyOpen`,
    /// `InvalidPrice`, `InvalidMaxPlayers`, `InvalidHoles`,
    /// `InvalidPayoutScheme`, `InvalidAcePoolContribution`.
    #[allow(clippy::too_many_arguments)]
    pub fn start_league_round(
        &mut self,
        league: &str,
        price_to_join: Decimal,
        ace_pool_contribution: Decimal,
        max_players: usize,
        holes: usize,
        payout_scheme: Vec<u8>,
        caller: Principal,
    ) -> Result<()> {
        let league_rec = self.registry.get_mut(league)?;
        if caller != league_rec.owner {
            return Err(LeagueError::NotLeagueOwner);
        }
        if league_rec.has_open_round() {
            return Err(LeagueError::RoundAlreadyOpen);
        }
        let config = RoundConfig::new(
            price_to_join,
            ace_pool_contribution,
            max_players,
            holes,
            payout_scheme,
        )?;

        // The settled predecessor is dropped here; any ace pool it still
        // carried stays escrowed on the league for the external hook.
        if let Some(old) = league_rec.active_round.take() {
            league_rec.ace_pool_carry += old.ace_pool_balance;
        }
        league_rec.rounds_started += 1;
        league_rec.active_round = Some(Round::new(config));
        tracing::info!(
            league,
            round_seq = league_rec.rounds_started,
            price = %price_to_join,
            "Round opened"
        );
        Ok(())
    }

    // =================================================================
    // Player operations
    // =================================================================

    /// Join the league's open round, escrowing the exact payment.
    ///
    /// # Errors
    /// `UnknownLeague`, `RoundNotStarted`, `AlreadyJoined`, `RoundFull`,
    /// or an `IncorrectFunds` kind.
    pub fn join_league_round(
        &mut self,
        league: &str,
        wants_ace_pool: bool,
        payment: Decimal,
        caller: Principal,
    ) -> Result<()> {
        let league_rec = self.registry.get_mut(league)?;
        let round = league_rec
            .active_round
            .as_mut()
            .filter(|r| r.is_open)
            .ok_or(LeagueError::RoundNotStarted)?;
        round.join(caller, wants_ace_pool, payment)?;

        // The payment is now held by the system, credited to nobody.
        self.ledger.record_escrow(payment);
        tracing::debug!(league, player = %caller, payment = %payment, "Player joined round");
        Ok(())
    }

    /// Forfeit the caller's place in the open round. Terminal; the entry
    /// fee stays in the pool for the remaining ranked players.
    ///
    /// # Errors
    /// `UnknownLeague`, `NoOpenRound`, `NotInRound`, `AlreadySubmitted`.
    pub fn forfeit_round(&mut self, league: &str, caller: Principal) -> Result<()> {
        let round = self.registry.get_mut(league)?.open_round_mut()?;
        round.forfeit(caller)?;
        tracing::debug!(league, player = %caller, "Player forfeited");
        Ok(())
    }

    /// Submit the caller's hole scores for the open round. Terminal.
    ///
    /// # Errors
    /// `UnknownLeague`, `NoOpenRound`, `NotInRound`, `AlreadySubmitted`,
    /// `InvalidScoreArraySize`.
    pub fn submit_scores(
        &mut self,
        league: &str,
        hole_scores: Vec<i32>,
        caller: Principal,
    ) -> Result<()> {
        let round = self.registry.get_mut(league)?.open_round_mut()?;
        round.submit_scores(caller, hole_scores)?;
        tracing::debug!(league, player = %caller, "Scores submitted");
        Ok(())
    }

    // =================================================================
    // Settlement
    // =================================================================

    /// Settle the open round: rank non-forfeited players, credit the pool
    /// per the payout scheme, sweep the remainder to the league balance,
    /// and close the round.
    ///
    /// The commit phase is all book entries and cannot fail, so the
    /// settlement is atomic: a returned error means nothing changed.
    ///
    /// # Errors
    /// `UnknownLeague`, `NotLeagueOwner`, `NoOpenRound`,
    /// `PayoutConditionsNotMet`.
    pub fn finish_round(&mut self, league: &str, caller: Principal) -> Result<SettlementResult> {
        let league_rec = self.registry.get_mut(league)?;
        if caller != league_rec.owner {
            return Err(LeagueError::NotLeagueOwner);
        }
        let round_seq = league_rec.rounds_started;
        let round = league_rec.open_round_mut()?;
        if !round.all_finished() {
            return Err(LeagueError::PayoutConditionsNotMet {
                finished: round.finished_count,
                joined: round.players.len(),
            });
        }

        let distribution = compute_distribution(round);

        // Commit: infallible from here on.
        for entry in &distribution.entries {
            self.ledger.credit(entry.principal, entry.amount);
        }
        let ace_pool_balance = round.ace_pool_balance;
        round.close();
        league_rec.balance += distribution.remainder;

        let result = SettlementResult {
            id: SettlementId::deterministic(league, round_seq),
            league: league.to_string(),
            payouts: distribution.entries,
            remainder: distribution.remainder,
            ace_pool_balance,
            settled_at: Utc::now(),
        };
        tracing::info!(
            league,
            settlement = %result.id,
            payouts = result.payouts.len(),
            paid = %result.total_paid(),
            remainder = %result.remainder,
            "Round settled"
        );
        Ok(result)
    }

    /// Claim the caller's accumulated winnings. The ledger entry is
    /// zeroed before the gateway transfer; a failed transfer restores it.
    ///
    /// # Errors
    /// `NothingToClaim`, or the gateway's `TransferFailed`.
    pub fn claim_winnings(&mut self, caller: Principal) -> Result<Decimal> {
        let transferred = self.ledger.claim(caller, &mut self.gateway)?;
        tracing::info!(player = %caller, amount = %transferred, "Winnings claimed");
        Ok(transferred)
    }

    // =================================================================
    // Read-only queries (never mutate state)
    // =================================================================

    /// League summary.
    ///
    /// # Errors
    /// `UnknownLeague`.
    pub fn league_info(&self, league: &str) -> Result<LeagueInfo> {
        let league_rec = self.registry.get(league)?;
        Ok(LeagueInfo {
            name: league_rec.name.clone(),
            owner: league_rec.owner,
            balance: league_rec.balance,
            ace_pool_balance: league_rec.ace_pool_total(),
            rounds_started: league_rec.rounds_started,
            round_open: league_rec.has_open_round(),
        })
    }

    /// Current round summary (open or settled).
    ///
    /// # Errors
    /// `UnknownLeague`, `NoOpenRound` if no round was ever started.
    pub fn round_info(&self, league: &str) -> Result<RoundInfo> {
        let league_rec = self.registry.get(league)?;
        let round = league_rec
            .active_round
            .as_ref()
            .ok_or(LeagueError::NoOpenRound)?;
        Ok(RoundInfo {
            price_to_join: round.config.price_to_join,
            ace_pool_contribution: round.config.ace_pool_contribution,
            max_players: round.config.max_players,
            holes: round.config.holes,
            payout_scheme: round.config.payout_scheme.percentages().to_vec(),
            is_open: round.is_open,
            pool_balance: round.pool_balance,
            ace_pool_balance: round.ace_pool_balance,
            player_count: round.players.len(),
            finished_count: round.finished_count,
        })
    }

    /// The current round's players in join order.
    ///
    /// # Errors
    /// `UnknownLeague`, `NoOpenRound` if no round was ever started.
    pub fn players(&self, league: &str) -> Result<&[PlayerRoundState]> {
        let league_rec = self.registry.get(league)?;
        league_rec
            .active_round
            .as_ref()
            .map(|r| r.players.as_slice())
            .ok_or(LeagueError::NoOpenRound)
    }

    /// One player's state within the current round.
    ///
    /// # Errors
    /// `UnknownLeague`, `NoOpenRound`, `NotInRound`.
    pub fn player_round_info(
        &self,
        league: &str,
        principal: Principal,
    ) -> Result<&PlayerRoundState> {
        self.players(league)?
            .iter()
            .find(|p| p.principal == principal)
            .ok_or(LeagueError::NotInRound)
    }

    /// A player's index in the current round's join order.
    ///
    /// # Errors
    /// `UnknownLeague`, `NoOpenRound`, `NotInRound`.
    pub fn player_index(&self, league: &str, principal: Principal) -> Result<usize> {
        self.players(league)?
            .iter()
            .position(|p| p.principal == principal)
            .ok_or(LeagueError::NotInRound)
    }

    /// Claimable winnings for a principal. Zero if none.
    #[must_use]
    pub fn pending_winnings(&self, principal: Principal) -> Decimal {
        self.ledger.pending(principal)
    }

    /// Verify escrow conservation across the whole system: everything
    /// escrowed must be claimable, paid out, or still held by leagues
    /// (open pools, ace pools, swept balances).
    ///
    /// # Errors
    /// `ConservationViolation` if the books do not balance.
    pub fn audit(&self) -> Result<()> {
        let held: Decimal = self
            .registry
            .iter()
            .map(|league| {
                league.balance
                    + league.ace_pool_carry
                    + league.active_round.as_ref().map_or(Decimal::ZERO, |r| {
                        r.pool_balance + r.ace_pool_balance
                    })
            })
            .sum();
        self.ledger.verify_conservation(held)
    }

    /// Access the injected gateway (tests inspect recorded transfers).
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}
