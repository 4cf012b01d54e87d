//! Setup: validate the roster and config, shuffle seating, and draw round 1.

use crate::logic::pairing::generate_round;
use crate::logic::rng::RandomSource;
use crate::models::{Format, Player, Tournament, TournamentConfig, TournamentError, MAX_PLAYERS};
use chrono::{DateTime, Utc};

/// Start a tournament from player names.
///
/// Blank names are dropped and the rest trimmed. Fails without building anything if
/// fewer than 4 names remain, a name repeats (case-insensitive), or the config is invalid.
/// The roster is shuffled once, then round 1 is seated from that order.
pub fn start_tournament<R: RandomSource>(
    names: &[String],
    config: TournamentConfig,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<Tournament, TournamentError> {
    config.validate()?;
    if names.len() > MAX_PLAYERS {
        return Err(TournamentError::TooManyPlayers {
            count: names.len(),
            max: MAX_PLAYERS,
        });
    }

    let mut players: Vec<Player> = Vec::with_capacity(names.len());
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if players.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateName(name.to_string()));
        }
        players.push(Player::new(name));
    }
    if players.len() < 4 {
        return Err(TournamentError::InvalidRosterSize {
            valid: players.len(),
        });
    }

    rng.shuffle(&mut players);
    let mut tournament = Tournament::new(config, players, now);
    let draw = generate_round(
        &tournament.player_names(),
        &tournament.players,
        config.format,
        1,
        config.max_courts,
    );
    tournament.courts = draw.courts;
    tournament.waiting = draw.waiting;
    if config.format == Format::Americano {
        let mut next = tournament.player_names();
        rng.shuffle(&mut next);
        tournament.next_order = next;
    }

    log::info!(
        "Started {:?} tournament {} with {} players on {} court(s)",
        config.format,
        tournament.id,
        tournament.players.len(),
        tournament.courts.len()
    );
    Ok(tournament)
}

/// Restart with the same player names and config: points, round and history are cleared.
pub fn restart_tournament<R: RandomSource>(
    tournament: &mut Tournament,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<(), TournamentError> {
    let config = tournament.config;
    reconfigure_tournament(tournament, config, rng, now)
}

/// Replace the config, which restarts the tournament with the same names.
/// The tournament keeps its id; on error it is left untouched.
pub fn reconfigure_tournament<R: RandomSource>(
    tournament: &mut Tournament,
    config: TournamentConfig,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<(), TournamentError> {
    let id = tournament.id;
    let mut fresh = start_tournament(&tournament.player_names(), config, rng, now)?;
    fresh.id = id;
    *tournament = fresh;
    log::info!("Tournament {} restarted", id);
    Ok(())
}
