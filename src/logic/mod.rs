//! Tournament business logic: setup, pairing, live scoring, settlement, standings.

mod export;
mod leaderboard;
mod pairing;
mod rng;
mod scoring;
mod settlement;
mod setup;

pub use export::{match_log_csv, write_match_log_csv};
pub use leaderboard::{leaderboard, Standing};
pub use pairing::{court_count, generate_round, next_round_order, rank_by_points, RoundDraw};
pub use rng::{RandomSource, SeededRng, SystemRng};
pub use scoring::{
    all_courts_finished, apply_delta, is_finished, server_and_side, serving_position,
    time_remaining, update_score,
};
pub use settlement::{confirm_round, credited_points, normalize_score, undo_last_round};
pub use setup::{reconfigure_tournament, restart_tournament, start_tournament};
