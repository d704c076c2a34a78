//! League registry: name-keyed league records with ownership.
//!
//! Leagues are permanent: created on first use of a name, never
//! destroyed. Each league owns at most one live [`Round`]; the slot is
//! reused when a new round starts.

use std::collections::HashMap;

use fairway_types::{LeagueError, Principal, Result};
use rust_decimal::Decimal;

use crate::round::Round;

/// A named, owned container hosting at most one active round.
#[derive(Debug)]
pub struct League {
    pub name: String,
    /// Only the owner may start or finish rounds.
    pub owner: Principal,
    /// Residual currency owned by the league (swept payout remainders).
    pub balance: Decimal,
    /// Ace pool funds from settled rounds whose slot was reused before the
    /// external award hook drained them. Still escrowed by the system.
    pub ace_pool_carry: Decimal,
    /// Rounds ever started; feeds deterministic settlement ids.
    pub rounds_started: u64,
    /// The current round, open or settled. `None` until the first start.
    pub active_round: Option<Round>,
}

impl League {
    #[must_use]
    pub fn new(name: impl Into<String>, owner: Principal) -> Self {
        Self {
            name: name.into(),
            owner,
            balance: Decimal::ZERO,
            ace_pool_carry: Decimal::ZERO,
            rounds_started: 0,
            active_round: None,
        }
    }

    /// Total ace pool owed to the external award hook: the current round's
    /// balance plus anything carried from replaced rounds.
    #[must_use]
    pub fn ace_pool_total(&self) -> Decimal {
        self.ace_pool_carry
            + self
                .active_round
                .as_ref()
                .map_or(Decimal::ZERO, |r| r.ace_pool_balance)
    }

    /// Whether a round is currently open for this league.
    #[must_use]
    pub fn has_open_round(&self) -> bool {
        self.active_round.as_ref().is_some_and(|r| r.is_open)
    }

    /// The open round, or `NoOpenRound`.
    pub fn open_round(&self) -> Result<&Round> {
        self.active_round
            .as_ref()
            .filter(|r| r.is_open)
            .ok_or(LeagueError::NoOpenRound)
    }

    /// Mutable access to the open round, or `NoOpenRound`.
    pub fn open_round_mut(&mut self) -> Result<&mut Round> {
        self.active_round
            .as_mut()
            .filter(|r| r.is_open)
            .ok_or(LeagueError::NoOpenRound)
    }
}

/// Maps league names to leagues; enforces name uniqueness.
#[derive(Debug, Default)]
pub struct LeagueRegistry {
    leagues: HashMap<String, League>,
}

impl LeagueRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new league.
    ///
    /// # Errors
    /// `DuplicateName` if the name is already taken.
    pub fn create(&mut self, name: &str, owner: Principal) -> Result<&League> {
        if self.leagues.contains_key(name) {
            return Err(LeagueError::DuplicateName(name.to_string()));
        }
        Ok(self
            .leagues
            .entry(name.to_string())
            .or_insert_with(|| League::new(name, owner)))
    }

    /// Look up a league by name.
    ///
    /// # Errors
    /// `UnknownLeague` if absent.
    pub fn get(&self, name: &str) -> Result<&League> {
        self.leagues
            .get(name)
            .ok_or_else(|| LeagueError::UnknownLeague(name.to_string()))
    }

    /// Mutable lookup by name.
    ///
    /// # Errors
    /// `UnknownLeague` if absent.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut League> {
        self.leagues
            .get_mut(name)
            .ok_or_else(|| LeagueError::UnknownLeague(name.to_string()))
    }

    /// Number of registered leagues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leagues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leagues.is_empty()
    }

    /// Iterate over all leagues (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &League> {
        self.leagues.values()
    }
}
