//! Live scoring: completion rules, score changes, and server/side indication.

use crate::models::{
    round_limit, Court, MatchScore, MatchStatus, PlayerId, ScoreDelta, ScoringMode, Side, Team,
    Tournament, TournamentError,
};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Whether a match with this score is over under `scoring`.
///
/// `elapsed` is the round's running time; only `TimeBound` looks at it.
pub fn is_finished(score_a: u32, score_b: u32, elapsed: Duration, scoring: &ScoringMode) -> bool {
    match *scoring {
        ScoringMode::TotalPoints { target } => score_a + score_b >= target,
        ScoringMode::FirstTo { target } => score_a >= target || score_b >= target,
        ScoringMode::TimeBound { duration_secs, .. } => {
            elapsed > Duration::from_secs(duration_secs)
        }
    }
}

/// Position in the serving rotation and service side after `total` points.
///
/// The server changes every 4 points and the cycle repeats every 16; the side flips every point.
pub fn serving_position(total: u32) -> (usize, Side) {
    let server_index = ((total / 4) % 4) as usize;
    let side = if total % 2 == 0 { Side::Deuce } else { Side::Ad };
    (server_index, side)
}

/// Current server and side for a court.
pub fn server_and_side(court: &Court) -> (&PlayerId, Side) {
    let (idx, side) = serving_position(court.score.total());
    (court.serving_rotation()[idx], side)
}

/// Apply one score change to a court and re-evaluate its status.
///
/// Increments are ignored once the court is finished and saturate at the target in
/// `FirstTo` mode. Decrements floor at zero and still apply to a finished court, which
/// stays finished: only undoing a settled round brings a court back to live play.
pub fn apply_delta(
    court: &mut Court,
    team: Team,
    delta: ScoreDelta,
    elapsed: Duration,
    scoring: &ScoringMode,
) {
    refresh_status(court, elapsed, scoring);
    let score = court.score.get_mut(team);
    match delta {
        ScoreDelta::Increment => {
            if court.status == MatchStatus::Finished {
                return;
            }
            *score += 1;
            if let ScoringMode::FirstTo { target } = *scoring {
                *score = (*score).min(target);
            }
        }
        ScoreDelta::Decrement => {
            *score = score.saturating_sub(1);
        }
    }
    refresh_status(court, elapsed, scoring);
}

/// Latch a live court to `Finished` once its score or the clock says so. Never reverts.
pub(crate) fn refresh_status(court: &mut Court, elapsed: Duration, scoring: &ScoringMode) {
    let MatchScore { a, b } = court.score;
    if court.status == MatchStatus::Live && is_finished(a, b, elapsed, scoring) {
        court.status = MatchStatus::Finished;
    }
}

/// Change one team's score on one court of the current round.
pub fn update_score(
    tournament: &mut Tournament,
    court_index: usize,
    team: Team,
    delta: ScoreDelta,
    now: DateTime<Utc>,
) -> Result<(), TournamentError> {
    let elapsed = tournament.elapsed(now);
    let scoring = tournament.config.scoring;
    let court = tournament
        .courts
        .get_mut(court_index)
        .ok_or(TournamentError::CourtNotFound(court_index))?;
    apply_delta(court, team, delta, elapsed, &scoring);
    log::debug!(
        "Round {} {}: {}-{} ({:?})",
        tournament.round,
        court.label,
        court.score.a,
        court.score.b,
        court.status
    );
    Ok(())
}

/// True when every court in the current round is over at `now`.
///
/// A court counts once its status has latched to finished, or when its score or the
/// clock says it is over, so an expired time-bound round needs no further score change.
pub fn all_courts_finished(tournament: &Tournament, now: DateTime<Utc>) -> bool {
    let elapsed = tournament.elapsed(now);
    tournament.courts.iter().all(|c| {
        c.is_finished() || is_finished(c.score.a, c.score.b, elapsed, &tournament.config.scoring)
    })
}

/// Time left in a time-bound round (zero once expired). `None` for point-based scoring.
pub fn time_remaining(tournament: &Tournament, now: DateTime<Utc>) -> Option<chrono::Duration> {
    match tournament.config.scoring {
        ScoringMode::TimeBound { duration_secs, .. } => {
            let limit = round_limit(duration_secs)?;
            let left = limit - (now - tournament.round_started_at);
            Some(left.max(chrono::Duration::zero()))
        }
        _ => None,
    }
}
