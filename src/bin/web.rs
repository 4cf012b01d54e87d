//! Single binary web server: JSON API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use padel_tournament_web::{
    all_courts_finished, confirm_round, default_player_names, leaderboard, match_log_csv,
    next_round_order, reconfigure_tournament, restart_tournament, server_and_side,
    start_tournament, time_remaining, undo_last_round, update_score, Court, Format, Player,
    PlayerId, ScoreDelta, ScoringMode, SeededRng, Side, SystemRng, Team, Tournament,
    TournamentConfig, TournamentError, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: tournaments by ID (one per browser session). Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    /// Player names; when empty, `player_count` default names are used.
    #[serde(default)]
    players: Vec<String>,
    #[serde(default = "default_player_count")]
    player_count: usize,
    #[serde(default)]
    format: Format,
    #[serde(default)]
    scoring: ScoringMode,
    #[serde(default)]
    max_courts: Option<usize>,
    /// Fixed seed for reproducible pairings.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_player_count() -> usize {
    8
}

#[derive(Deserialize)]
struct ScoreBody {
    team: Team,
    /// +1 or -1.
    delta: i32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and court index (e.g. /api/tournaments/{id}/courts/{court})
#[derive(Deserialize)]
struct TournamentCourtPath {
    id: TournamentId,
    court: usize,
}

/// Court plus derived server/side for display.
#[derive(Serialize)]
struct CourtView<'a> {
    #[serde(flatten)]
    court: &'a Court,
    server: &'a PlayerId,
    side: Side,
}

/// Tournament as the UI renders it. Undo history and the match log stay server-side
/// (see `rounds/undo` and `log.csv`).
#[derive(Serialize)]
struct TournamentView<'a> {
    id: TournamentId,
    config: &'a TournamentConfig,
    players: &'a [Player],
    round: u32,
    courts: Vec<CourtView<'a>>,
    waiting: &'a [PlayerId],
    next_order: &'a [PlayerId],
    round_started_at: DateTime<Utc>,
    all_finished: bool,
    time_remaining_secs: Option<i64>,
    can_undo: bool,
    settled_matches: usize,
}

impl<'a> TournamentView<'a> {
    fn new(tournament: &'a Tournament) -> Self {
        let now = Utc::now();
        let courts = tournament
            .current_courts()
            .iter()
            .map(|court| {
                let (server, side) = server_and_side(court);
                CourtView {
                    court,
                    server,
                    side,
                }
            })
            .collect();
        Self {
            id: tournament.id,
            config: &tournament.config,
            players: &tournament.players,
            round: tournament.round,
            courts,
            waiting: tournament.waiting(),
            next_order: &tournament.next_order,
            round_started_at: tournament.round_started_at,
            all_finished: all_courts_finished(tournament, now),
            time_remaining_secs: time_remaining(tournament, now).map(|d| d.num_seconds()),
            can_undo: !tournament.history.is_empty(),
            settled_matches: tournament.match_log.len(),
        }
    }
}

fn error_response(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Create and start a tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let names = if body.players.is_empty() {
        match default_player_names(body.player_count) {
            Ok(names) => names,
            Err(e) => return error_response(e),
        }
    } else {
        body.players
    };
    let config = TournamentConfig {
        format: body.format,
        scoring: body.scoring,
        max_courts: body.max_courts,
    };
    let now = Utc::now();
    let started = match body.seed {
        Some(seed) => start_tournament(&names, config, &mut SeededRng::from_seed(seed), now),
        None => start_tournament(&names, config, &mut SystemRng, now),
    };
    let tournament = match started {
        Ok(t) => t,
        Err(e) => return error_response(e),
    };
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(TournamentEntry {
        tournament,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(TournamentView::new(&entry.tournament))
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(TournamentView::new(&entry.tournament))
        }
        None => not_found(),
    }
}

/// Add or remove one point for a team on one court.
#[put("/api/tournaments/{id}/courts/{court}/score")]
async fn api_update_score(
    state: AppState,
    path: Path<TournamentCourtPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    let delta = match ScoreDelta::from_signed(body.delta) {
        Some(d) => d,
        None => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "delta must be +1 or -1" }))
        }
    };
    match update_score(t, path.court, body.team, delta, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(TournamentView::new(t)),
        Err(e) => error_response(e),
    }
}

/// Settle the current round once every court is finished; seats the next round.
#[post("/api/tournaments/{id}/rounds/confirm")]
async fn api_confirm_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match confirm_round(t, &mut SystemRng, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(TournamentView::new(t)),
        Err(e) => error_response(e),
    }
}

/// Undo the last settled round.
#[post("/api/tournaments/{id}/rounds/undo")]
async fn api_undo_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match undo_last_round(t) {
        Ok(()) => HttpResponse::Ok().json(TournamentView::new(t)),
        Err(e) => error_response(e),
    }
}

#[get("/api/tournaments/{id}/leaderboard")]
async fn api_leaderboard(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(leaderboard(&entry.tournament)),
        None => not_found(),
    }
}

/// Preview of the next round's seating order (read-only).
#[get("/api/tournaments/{id}/next-round")]
async fn api_next_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(next_round_order(&entry.tournament)),
        None => not_found(),
    }
}

/// Settled matches as CSV.
#[get("/api/tournaments/{id}/log.csv")]
async fn api_match_log_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    match match_log_csv(&entry.tournament.match_log) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"round-{}.csv\"", entry.tournament.round),
            ))
            .body(csv),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

/// Restart tournament: round 1 with the same player names and config.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match restart_tournament(t, &mut SystemRng, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(TournamentView::new(t)),
        Err(e) => error_response(e),
    }
}

/// Change format/scoring; restarts the tournament.
#[put("/api/tournaments/{id}/config")]
async fn api_set_config(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentConfig>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match reconfigure_tournament(t, body.into_inner(), &mut SystemRng, Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(TournamentView::new(t)),
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_update_score)
            .service(api_confirm_round)
            .service(api_undo_round)
            .service(api_leaderboard)
            .service(api_next_round)
            .service(api_match_log_csv)
            .service(api_restart_tournament)
            .service(api_set_config)
    })
    .bind(bind)?
    .run()
    .await
}
