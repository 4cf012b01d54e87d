//! Data structures for the padel tournament: players, courts, config, tournament state.

mod config;
mod court;
mod match_log;
mod player;
mod tournament;

pub use config::{round_limit, Format, ScoringMode, TournamentConfig, MAX_ROUND_SECS};
pub use court::{Court, MatchScore, MatchStatus, ScoreDelta, Side, Team};
pub use match_log::MatchLogEntry;
pub use player::{default_player_names, Player, PlayerId, MAX_PLAYERS};
pub use tournament::{RoundSnapshot, Tournament, TournamentError, TournamentId};
