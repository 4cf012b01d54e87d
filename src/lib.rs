//! Padel tournament organizer (Americano / Mexicano): library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    all_courts_finished, apply_delta, confirm_round, court_count, credited_points,
    generate_round, is_finished, leaderboard, match_log_csv, next_round_order, normalize_score,
    rank_by_points, reconfigure_tournament, restart_tournament, server_and_side,
    serving_position, start_tournament, time_remaining, undo_last_round, update_score,
    write_match_log_csv, RandomSource, RoundDraw, SeededRng, Standing, SystemRng,
};
pub use models::{
    default_player_names, round_limit, Court, Format, MatchLogEntry, MatchScore, MatchStatus,
    Player, PlayerId, RoundSnapshot, ScoreDelta, ScoringMode, Side, Team, Tournament,
    TournamentConfig, TournamentError, TournamentId, MAX_PLAYERS, MAX_ROUND_SECS,
};
