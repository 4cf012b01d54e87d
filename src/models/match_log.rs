//! Append-only record of settled matches.

use crate::models::court::{Court, MatchScore};
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One settled court in one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchLogEntry {
    pub round: u32,
    pub court: String,
    pub team_a: [PlayerId; 2],
    pub team_b: [PlayerId; 2],
    /// Score as entered on court.
    pub raw_score: MatchScore,
    /// Points credited to each member of team A (normalized in time-bound mode).
    pub points_a: f64,
    pub points_b: f64,
    pub settled_at: DateTime<Utc>,
}

impl MatchLogEntry {
    pub fn from_court(
        round: u32,
        court: &Court,
        points: (f64, f64),
        settled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            round,
            court: court.label.clone(),
            team_a: court.team_a.clone(),
            team_b: court.team_b.clone(),
            raw_score: court.score,
            points_a: points.0,
            points_b: points.1,
            settled_at,
        }
    }
}
