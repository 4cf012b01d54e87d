//! Court (one 2v2 match within a round), Team, and live score types.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Which side of the net a team plays on.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    A,
    B,
}

/// Score change requested by the operator (one point up or down).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDelta {
    Increment,
    Decrement,
}

impl ScoreDelta {
    /// Map a signed delta (+1 / -1) onto a score change. Zero is not a change.
    pub fn from_signed(delta: i32) -> Option<Self> {
        match delta.signum() {
            1 => Some(ScoreDelta::Increment),
            -1 => Some(ScoreDelta::Decrement),
            _ => None,
        }
    }
}

/// Live state of a court.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Live,
    Finished,
}

/// Service court the server stands on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Right-hand court, even point totals.
    Deuce,
    /// Left-hand court, odd point totals.
    Ad,
}

/// Raw points scored by each team during live play.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub a: u32,
    pub b: u32,
}

impl MatchScore {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    pub fn total(&self) -> u32 {
        self.a + self.b
    }

    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::A => self.a,
            Team::B => self.b,
        }
    }

    pub fn get_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::A => &mut self.a,
            Team::B => &mut self.b,
        }
    }
}

/// One court for one round: Team A = `team_a`, Team B = `team_b`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Court {
    /// Zero-based position within the round.
    pub index: usize,
    pub label: String,
    pub team_a: [PlayerId; 2],
    pub team_b: [PlayerId; 2],
    pub score: MatchScore,
    pub status: MatchStatus,
}

impl Court {
    /// New live court with a 0-0 score.
    pub fn new(index: usize, team_a: [PlayerId; 2], team_b: [PlayerId; 2]) -> Self {
        Self {
            index,
            label: format!("Court {}", index + 1),
            team_a,
            team_b,
            score: MatchScore::default(),
            status: MatchStatus::Live,
        }
    }

    pub fn team(&self, team: Team) -> &[PlayerId; 2] {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_a.iter().chain(self.team_b.iter())
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Serving order across the net: A1, B1, A2, B2.
    pub fn serving_rotation(&self) -> [&PlayerId; 4] {
        [
            &self.team_a[0],
            &self.team_b[0],
            &self.team_a[1],
            &self.team_b[1],
        ]
    }
}
