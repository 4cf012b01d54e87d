//! Standings: ranked read-only view of the roster.

use crate::models::{PlayerId, Tournament};
use serde::Serialize;

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based position.
    pub rank: usize,
    pub name: PlayerId,
    pub points: f64,
    pub matches_played: u32,
    /// Top three rows, for display only.
    pub podium: bool,
}

/// Players by descending points. Equal points keep roster order.
pub fn leaderboard(tournament: &Tournament) -> Vec<Standing> {
    let mut players: Vec<_> = tournament.players.iter().collect();
    players.sort_by(|a, b| b.points.total_cmp(&a.points));
    players
        .into_iter()
        .enumerate()
        .map(|(i, p)| Standing {
            rank: i + 1,
            name: p.name.clone(),
            points: p.points,
            matches_played: p.matches_played,
            podium: i < 3,
        })
        .collect()
}
