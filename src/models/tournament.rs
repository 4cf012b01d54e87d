//! Tournament, round snapshots and TournamentError.

use crate::models::config::TournamentConfig;
use crate::models::court::Court;
use crate::models::match_log::MatchLogEntry;
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations. All are recoverable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 4 non-blank player names.
    InvalidRosterSize { valid: usize },
    /// More players than a tournament accepts.
    TooManyPlayers { count: usize, max: usize },
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicateName(String),
    /// Round confirmation attempted while a court is still live.
    NotReady,
    /// Undo requested with no settled round to revert.
    NoHistory,
    /// Scoring target, duration, normalization base or court cap is out of range.
    InvalidScoringConfig(String),
    /// No court with this index in the current round.
    CourtNotFound(usize),
    /// A court references a player missing from the roster.
    PlayerNotFound(PlayerId),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidRosterSize { valid } => {
                write!(f, "Need at least 4 players to start (got {})", valid)
            }
            TournamentError::TooManyPlayers { count, max } => {
                write!(f, "At most {} players are allowed (got {})", max, count)
            }
            TournamentError::DuplicateName(name) => {
                write!(f, "A player named '{}' already exists", name)
            }
            TournamentError::NotReady => write!(f, "Not all courts have finished"),
            TournamentError::NoHistory => write!(f, "No settled round to undo"),
            TournamentError::InvalidScoringConfig(reason) => {
                write!(f, "Invalid scoring config: {}", reason)
            }
            TournamentError::CourtNotFound(idx) => write!(f, "Court {} not found", idx + 1),
            TournamentError::PlayerNotFound(name) => write!(f, "Player '{}' not found", name),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Everything a confirmed round changed, captured just before settlement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub players: Vec<Player>,
    pub round: u32,
    pub next_order: Vec<PlayerId>,
    pub courts: Vec<Court>,
    pub waiting: Vec<PlayerId>,
    pub round_started_at: DateTime<Utc>,
    /// Match log length before this round's rows were appended.
    pub log_len: usize,
}

/// Full tournament state: roster, current round, history and log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub config: TournamentConfig,
    /// Roster in seating order (shuffled once at start).
    pub players: Vec<Player>,
    /// Current round number, starting at 1.
    pub round: u32,
    /// Current round's courts, indexed by court position.
    pub courts: Vec<Court>,
    /// Players sitting out the current round.
    pub waiting: Vec<PlayerId>,
    /// Americano: seating order already drawn for the following round. Empty for Mexicano.
    pub next_order: Vec<PlayerId>,
    pub round_started_at: DateTime<Utc>,
    /// Undo stack, most recent round last.
    pub history: Vec<RoundSnapshot>,
    pub match_log: Vec<MatchLogEntry>,
}

impl Tournament {
    /// Tournament at round 1 with no courts yet. Use `start_tournament` to validate and seat players.
    pub fn new(config: TournamentConfig, players: Vec<Player>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            players,
            round: 1,
            courts: Vec::new(),
            waiting: Vec::new(),
            next_order: Vec::new(),
            round_started_at: now,
            history: Vec::new(),
            match_log: Vec::new(),
        }
    }

    /// Read-only view of the current round's courts.
    pub fn current_courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn waiting(&self) -> &[PlayerId] {
        &self.waiting
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_names(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    /// Wall-clock time since the current round started (zero if `now` is earlier).
    pub fn elapsed(&self, now: DateTime<Utc>) -> std::time::Duration {
        (now - self.round_started_at)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO)
    }

    pub(crate) fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            players: self.players.clone(),
            round: self.round,
            next_order: self.next_order.clone(),
            courts: self.courts.clone(),
            waiting: self.waiting.clone(),
            round_started_at: self.round_started_at,
            log_len: self.match_log.len(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: RoundSnapshot) {
        self.players = snapshot.players;
        self.round = snapshot.round;
        self.next_order = snapshot.next_order;
        self.courts = snapshot.courts;
        self.waiting = snapshot.waiting;
        self.round_started_at = snapshot.round_started_at;
        self.match_log.truncate(snapshot.log_len);
    }
}
