//! Integration tests for live scoring: completion rules, clamping, server/side.

use chrono::{DateTime, TimeZone, Utc};
use padel_tournament_web::{
    all_courts_finished, is_finished, server_and_side, serving_position, start_tournament,
    time_remaining, update_score, Format, MatchStatus, RandomSource, ScoreDelta, ScoringMode,
    Side, Team, Tournament, TournamentConfig, TournamentError,
};
use std::time::Duration;

struct KeepOrder;

impl RandomSource for KeepOrder {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap()
}

fn tournament(scoring: ScoringMode) -> Tournament {
    let names: Vec<String> = ["Ana", "Ben", "Cai", "Dee"].iter().map(|s| s.to_string()).collect();
    let config = TournamentConfig::new(Format::Americano, scoring);
    start_tournament(&names, config, &mut KeepOrder, start_time()).unwrap()
}

fn press(t: &mut Tournament, team: Team, delta: ScoreDelta, times: u32) {
    for _ in 0..times {
        update_score(t, 0, team, delta, start_time()).unwrap();
    }
}

#[test]
fn server_changes_every_four_points_and_side_every_point() {
    let expected_server = [0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 0];
    for (total, &server) in expected_server.iter().enumerate() {
        let (idx, side) = serving_position(total as u32);
        assert_eq!(idx, server, "server at total {total}");
        let expected_side = if total % 2 == 0 { Side::Deuce } else { Side::Ad };
        assert_eq!(side, expected_side, "side at total {total}");
    }
    assert_eq!(serving_position(35), (0, Side::Ad));
}

#[test]
fn server_rotation_crosses_teams() {
    let mut t = tournament(ScoringMode::TotalPoints { target: 32 });
    // Team A = Ana, Ben; Team B = Cai, Dee
    assert_eq!(server_and_side(&t.courts[0]), (&"Ana".to_string(), Side::Deuce));
    press(&mut t, Team::A, ScoreDelta::Increment, 4);
    assert_eq!(server_and_side(&t.courts[0]).0, "Cai");
    press(&mut t, Team::B, ScoreDelta::Increment, 5);
    assert_eq!(server_and_side(&t.courts[0]), (&"Ben".to_string(), Side::Ad));
    press(&mut t, Team::B, ScoreDelta::Increment, 3);
    assert_eq!(server_and_side(&t.courts[0]).0, "Dee");
}

#[test]
fn total_points_finishes_at_target_sum() {
    let scoring = ScoringMode::TotalPoints { target: 24 };
    assert!(is_finished(13, 11, Duration::ZERO, &scoring));
    assert!(!is_finished(12, 11, Duration::ZERO, &scoring));

    let mut t = tournament(scoring);
    press(&mut t, Team::A, ScoreDelta::Increment, 12);
    press(&mut t, Team::B, ScoreDelta::Increment, 11);
    assert_eq!(t.courts[0].status, MatchStatus::Live);
    press(&mut t, Team::A, ScoreDelta::Increment, 1);
    assert_eq!(t.courts[0].status, MatchStatus::Finished);
    assert!(all_courts_finished(&t, start_time()));

    press(&mut t, Team::B, ScoreDelta::Increment, 3);
    assert_eq!((t.courts[0].score.a, t.courts[0].score.b), (13, 11));
}

#[test]
fn first_to_saturates_and_ignores_further_increments() {
    let mut t = tournament(ScoringMode::FirstTo { target: 6 });
    press(&mut t, Team::B, ScoreDelta::Increment, 4);
    press(&mut t, Team::A, ScoreDelta::Increment, 6);
    assert!(t.courts[0].is_finished());
    press(&mut t, Team::A, ScoreDelta::Increment, 2);
    press(&mut t, Team::B, ScoreDelta::Increment, 2);
    assert_eq!((t.courts[0].score.a, t.courts[0].score.b), (6, 4));
}

#[test]
fn decrement_corrects_a_finished_court_without_reopening_it() {
    let mut t = tournament(ScoringMode::FirstTo { target: 6 });
    press(&mut t, Team::A, ScoreDelta::Increment, 6);
    assert!(t.courts[0].is_finished());

    press(&mut t, Team::A, ScoreDelta::Decrement, 1);
    assert_eq!(t.courts[0].score.a, 5);
    assert_eq!(t.courts[0].status, MatchStatus::Finished);
    assert!(all_courts_finished(&t, start_time()));

    press(&mut t, Team::A, ScoreDelta::Increment, 1);
    press(&mut t, Team::B, ScoreDelta::Increment, 1);
    assert_eq!((t.courts[0].score.a, t.courts[0].score.b), (5, 0));
}

#[test]
fn decrement_floors_at_zero() {
    let mut t = tournament(ScoringMode::TotalPoints { target: 24 });
    press(&mut t, Team::B, ScoreDelta::Increment, 1);
    press(&mut t, Team::B, ScoreDelta::Decrement, 3);
    assert_eq!(t.courts[0].score.b, 0);
    assert_eq!(t.courts[0].status, MatchStatus::Live);
}

#[test]
fn time_bound_finishes_only_after_the_window() {
    let scoring = ScoringMode::TimeBound {
        duration_secs: 600,
        norm_base: 24,
    };
    assert!(!is_finished(9, 2, Duration::from_secs(600), &scoring));
    assert!(is_finished(0, 0, Duration::from_secs(601), &scoring));

    let t = tournament(scoring);
    let during = start_time() + chrono::Duration::seconds(120);
    let after = start_time() + chrono::Duration::seconds(601);
    assert!(!all_courts_finished(&t, during));
    assert!(all_courts_finished(&t, after));
    assert_eq!(time_remaining(&t, during), Some(chrono::Duration::seconds(480)));
    assert_eq!(time_remaining(&t, after), Some(chrono::Duration::zero()));
}

#[test]
fn time_bound_rejects_increments_after_expiry() {
    let mut t = tournament(ScoringMode::TimeBound {
        duration_secs: 60,
        norm_base: 24,
    });
    update_score(&mut t, 0, Team::A, ScoreDelta::Increment, start_time()).unwrap();
    let late = start_time() + chrono::Duration::seconds(90);
    update_score(&mut t, 0, Team::A, ScoreDelta::Increment, late).unwrap();
    assert_eq!(t.courts[0].score.a, 1);
    assert!(t.courts[0].is_finished());
}

#[test]
fn point_modes_have_no_clock() {
    let t = tournament(ScoringMode::TotalPoints { target: 24 });
    assert_eq!(time_remaining(&t, start_time()), None);
}

#[test]
fn unknown_court_is_rejected() {
    let mut t = tournament(ScoringMode::TotalPoints { target: 24 });
    assert_eq!(
        update_score(&mut t, 3, Team::A, ScoreDelta::Increment, start_time()),
        Err(TournamentError::CourtNotFound(3))
    );
}

#[test]
fn signed_deltas_map_to_changes() {
    assert_eq!(ScoreDelta::from_signed(1), Some(ScoreDelta::Increment));
    assert_eq!(ScoreDelta::from_signed(-1), Some(ScoreDelta::Decrement));
    assert_eq!(ScoreDelta::from_signed(0), None);
}
