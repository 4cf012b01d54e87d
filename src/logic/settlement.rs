//! Round settlement: credit finished scores, draw the next round, and undo.

use crate::logic::pairing::generate_round;
use crate::logic::rng::RandomSource;
use crate::logic::scoring::all_courts_finished;
use crate::models::{Format, MatchLogEntry, MatchScore, ScoringMode, Tournament, TournamentError};
use chrono::{DateTime, Utc};

/// Rescale a raw score so both sides sum to `norm_base`, rounded to one decimal
/// (halves to even). A 0-0 score stays 0-0.
pub fn normalize_score(score: &MatchScore, norm_base: u32) -> (f64, f64) {
    let total = score.total();
    if total == 0 {
        return (0.0, 0.0);
    }
    let scale = |x: u32| {
        let tenths = f64::from(x) * f64::from(norm_base) * 10.0 / f64::from(total);
        tenths.round_ties_even() / 10.0
    };
    (scale(score.a), scale(score.b))
}

/// Points each member of team A and team B earns for this score.
pub fn credited_points(score: &MatchScore, scoring: &ScoringMode) -> (f64, f64) {
    match *scoring {
        ScoringMode::TimeBound { norm_base, .. } => normalize_score(score, norm_base),
        _ => (f64::from(score.a), f64::from(score.b)),
    }
}

/// Settle the current round and seat the next one.
///
/// Requires every court to be finished at `now`. Points, log rows and the next draw
/// are built on copies first; the tournament is only written once all of that
/// succeeded, so an error leaves it exactly as it was.
pub fn confirm_round<R: RandomSource>(
    tournament: &mut Tournament,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<(), TournamentError> {
    if !all_courts_finished(tournament, now) {
        log::warn!("Round {} not settled: courts still live", tournament.round);
        return Err(TournamentError::NotReady);
    }

    let snapshot = tournament.snapshot();
    let mut players = tournament.players.clone();
    let mut log_rows = Vec::with_capacity(tournament.courts.len());

    for court in &tournament.courts {
        let (points_a, points_b) = credited_points(&court.score, &tournament.config.scoring);
        for (team, points) in [(&court.team_a, points_a), (&court.team_b, points_b)] {
            for name in team {
                players
                    .iter_mut()
                    .find(|p| &p.name == name)
                    .ok_or_else(|| TournamentError::PlayerNotFound(name.clone()))?
                    .record_match(points);
            }
        }
        log_rows.push(MatchLogEntry::from_court(
            tournament.round,
            court,
            (points_a, points_b),
            now,
        ));
    }

    let round = tournament.round + 1;
    let config = tournament.config;
    let roster_order: Vec<_> = players.iter().map(|p| p.name.clone()).collect();
    let (draw, next_order) = match config.format {
        Format::Americano => {
            let draw = generate_round(
                &tournament.next_order,
                &players,
                config.format,
                round,
                config.max_courts,
            );
            let mut next = roster_order;
            rng.shuffle(&mut next);
            (draw, next)
        }
        Format::Mexicano => {
            let draw = generate_round(
                &roster_order,
                &players,
                config.format,
                round,
                config.max_courts,
            );
            (draw, Vec::new())
        }
    };

    tournament.history.push(snapshot);
    tournament.players = players;
    tournament.round = round;
    tournament.courts = draw.courts;
    tournament.waiting = draw.waiting;
    tournament.next_order = next_order;
    tournament.round_started_at = now;
    tournament.match_log.extend(log_rows);

    log::info!(
        "Tournament {}: round {} settled, round {} seated",
        tournament.id,
        round - 1,
        round
    );
    Ok(())
}

/// Revert the most recent settlement: roster, round, seating and its match log rows.
pub fn undo_last_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let snapshot = tournament.history.pop().ok_or(TournamentError::NoHistory)?;
    tournament.restore(snapshot);
    log::info!(
        "Tournament {}: reverted to round {}",
        tournament.id,
        tournament.round
    );
    Ok(())
}
