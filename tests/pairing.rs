//! Integration tests for court assignment (Americano and Mexicano).

use chrono::{TimeZone, Utc};
use padel_tournament_web::{
    court_count, generate_round, next_round_order, start_tournament, Format, Player, PlayerId,
    RandomSource, ScoringMode, TournamentConfig,
};
use std::collections::HashSet;

/// Leaves every slice in its given order.
struct KeepOrder;

impl RandomSource for KeepOrder {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

fn names(n: usize) -> Vec<PlayerId> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn roster(points: &[(&str, f64)]) -> Vec<Player> {
    points
        .iter()
        .map(|(name, pts)| Player {
            name: name.to_string(),
            points: *pts,
            matches_played: 1,
        })
        .collect()
}

#[test]
fn every_player_is_seated_or_waiting_exactly_once() {
    for n in 4..=13 {
        let order = names(n);
        let players: Vec<Player> = order.iter().map(Player::new).collect();
        for format in [Format::Americano, Format::Mexicano] {
            for round in [1, 2] {
                let draw = generate_round(&order, &players, format, round, None);
                assert_eq!(draw.courts.len(), n / 4);
                assert_eq!(draw.waiting.len(), n % 4);

                let mut seen = HashSet::new();
                for court in &draw.courts {
                    let members: HashSet<_> = court.players().collect();
                    assert_eq!(members.len(), 4);
                    for p in court.players() {
                        assert!(seen.insert(p.clone()), "{p} seated twice");
                    }
                }
                for p in &draw.waiting {
                    assert!(seen.insert(p.clone()), "{p} both seated and waiting");
                }
                assert_eq!(seen, order.iter().cloned().collect::<HashSet<_>>());
            }
        }
    }
}

#[test]
fn court_cap_sends_extra_players_to_waiting() {
    assert_eq!(court_count(13, None), 3);
    assert_eq!(court_count(13, Some(2)), 2);
    assert_eq!(court_count(5, Some(2)), 1);

    let order = names(12);
    let players: Vec<Player> = order.iter().map(Player::new).collect();
    let draw = generate_round(&order, &players, Format::Americano, 1, Some(2));
    assert_eq!(draw.courts.len(), 2);
    assert_eq!(draw.waiting, order[8..].to_vec());
}

#[test]
fn americano_seats_quartets_in_order() {
    let order = names(8);
    let players: Vec<Player> = order.iter().map(Player::new).collect();
    let draw = generate_round(&order, &players, Format::Americano, 3, None);
    assert_eq!(draw.courts[0].team_a, ["P0".to_string(), "P1".to_string()]);
    assert_eq!(draw.courts[0].team_b, ["P2".to_string(), "P3".to_string()]);
    assert_eq!(draw.courts[1].label, "Court 2");
    assert_eq!(draw.courts[1].index, 1);
}

#[test]
fn mexicano_pairs_top_and_bottom_against_middle() {
    let players = roster(&[("D", 1.0), ("B", 8.0), ("A", 10.0), ("C", 5.0)]);
    let order: Vec<PlayerId> = players.iter().map(|p| p.name.clone()).collect();
    let draw = generate_round(&order, &players, Format::Mexicano, 2, None);
    assert_eq!(draw.courts.len(), 1);
    assert_eq!(draw.courts[0].team_a, ["A".to_string(), "D".to_string()]);
    assert_eq!(draw.courts[0].team_b, ["B".to_string(), "C".to_string()]);
}

#[test]
fn mexicano_ties_keep_seating_order_and_lowest_ranked_wait() {
    let players = roster(&[
        ("E", 3.0),
        ("F", 3.0),
        ("G", 9.0),
        ("H", 3.0),
        ("I", 0.0),
    ]);
    let order: Vec<PlayerId> = players.iter().map(|p| p.name.clone()).collect();
    let draw = generate_round(&order, &players, Format::Mexicano, 4, None);
    // Ranked: G, E, F, H, I
    assert_eq!(draw.courts[0].team_a, ["G".to_string(), "H".to_string()]);
    assert_eq!(draw.courts[0].team_b, ["E".to_string(), "F".to_string()]);
    assert_eq!(draw.waiting, vec!["I".to_string()]);
}

#[test]
fn mexicano_first_round_ignores_points() {
    let players = roster(&[("A", 0.0), ("B", 10.0), ("C", 5.0), ("D", 7.0)]);
    let order: Vec<PlayerId> = players.iter().map(|p| p.name.clone()).collect();
    let draw = generate_round(&order, &players, Format::Mexicano, 1, None);
    assert_eq!(draw.courts[0].team_a, ["A".to_string(), "B".to_string()]);
    assert_eq!(draw.courts[0].team_b, ["C".to_string(), "D".to_string()]);
}

#[test]
fn next_round_preview_does_not_change_state() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();
    let config = TournamentConfig::new(Format::Americano, ScoringMode::TotalPoints { target: 24 });
    let t = start_tournament(&names(8), config, &mut KeepOrder, now).unwrap();
    let before = t.clone();

    let first = next_round_order(&t);
    let second = next_round_order(&t);
    assert_eq!(first, second);
    assert_eq!(first.len(), 8);
    assert_eq!(t, before);
}
