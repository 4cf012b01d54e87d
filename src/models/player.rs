//! Player data structure.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Unique identifier for a player: the player's display name (unique per tournament, case-insensitive).
pub type PlayerId = String;

/// A player on the roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerId,
    /// Cumulative points across all settled rounds (may be fractional after time-bound normalization).
    pub points: f64,
    pub matches_played: u32,
}

impl Player {
    /// Create a new player with the given name. Points and matches start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: 0.0,
            matches_played: 0,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.name
    }

    /// Credit one played match worth `points` to this player.
    pub fn record_match(&mut self, points: f64) {
        self.points += points;
        self.matches_played += 1;
    }
}

/// Largest roster a tournament accepts.
pub const MAX_PLAYERS: usize = 512;

/// Default roster names ("P1".."Pn") for when only a head count is given.
pub fn default_player_names(count: usize) -> Result<Vec<String>, TournamentError> {
    if count > MAX_PLAYERS {
        return Err(TournamentError::TooManyPlayers {
            count,
            max: MAX_PLAYERS,
        });
    }
    Ok((1..=count).map(|i| format!("P{i}")).collect())
}
