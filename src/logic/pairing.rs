//! Court assignment: turn a seating order into 2v2 courts plus a waiting list.

use crate::models::{Court, Format, Player, PlayerId, Tournament};

/// Courts for one round and the players sitting it out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoundDraw {
    pub courts: Vec<Court>,
    pub waiting: Vec<PlayerId>,
}

/// Number of playable courts for `player_count` players, capped by `max_courts`.
pub fn court_count(player_count: usize, max_courts: Option<usize>) -> usize {
    let full = player_count / 4;
    max_courts.map_or(full, |cap| full.min(cap))
}

/// Seat players for a round.
///
/// - Americano, and round 1 of Mexicano: `order` is used as given, quartets seated
///   (1st, 2nd) vs (3rd, 4th).
/// - Mexicano from round 2: `order` is stable-sorted by descending points (ties keep
///   their relative order), then each quartet seated (1st, 4th) vs (2nd, 3rd).
///
/// Players beyond the last full court go to `waiting`, in order.
pub fn generate_round(
    order: &[PlayerId],
    players: &[Player],
    format: Format,
    round: u32,
    max_courts: Option<usize>,
) -> RoundDraw {
    let ranked = format == Format::Mexicano && round >= 2;
    let seating = if ranked {
        rank_by_points(order, players)
    } else {
        order.to_vec()
    };

    let playing = court_count(seating.len(), max_courts) * 4;
    let courts: Vec<Court> = seating[..playing]
        .chunks_exact(4)
        .enumerate()
        .map(|(i, q)| {
            if ranked {
                Court::new(i, [q[0].clone(), q[3].clone()], [q[1].clone(), q[2].clone()])
            } else {
                Court::new(i, [q[0].clone(), q[1].clone()], [q[2].clone(), q[3].clone()])
            }
        })
        .collect();
    let waiting = seating[playing..].to_vec();

    log::debug!(
        "Round {}: {} court(s), {} waiting ({:?})",
        round,
        courts.len(),
        waiting.len(),
        format
    );
    RoundDraw { courts, waiting }
}

/// `order` sorted by descending cumulative points. Stable, so equal points keep seating order.
pub fn rank_by_points(order: &[PlayerId], players: &[Player]) -> Vec<PlayerId> {
    let points = |name: &PlayerId| {
        players
            .iter()
            .find(|p| &p.name == name)
            .map_or(0.0, |p| p.points)
    };
    let mut ranked: Vec<(PlayerId, f64)> = order.iter().map(|n| (n.clone(), points(n))).collect();
    ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    ranked.into_iter().map(|(n, _)| n).collect()
}

/// Seating order the next round will be drawn from, as far as it is known now.
///
/// Americano returns the order already drawn; Mexicano ranks the roster by current
/// points. Reading it never changes the tournament.
pub fn next_round_order(tournament: &Tournament) -> Vec<PlayerId> {
    match tournament.config.format {
        Format::Americano => tournament.next_order.clone(),
        Format::Mexicano => rank_by_points(&tournament.player_names(), &tournament.players),
    }
}
