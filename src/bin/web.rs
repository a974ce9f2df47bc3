//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::RwLock;
use take_six_tracker::{
    calculate_global_stats, calculate_hall_of_fame, calculate_leaderboard,
    calculate_player_profile, calculate_win_rate_by_table_size, PlayerId, ScoreEntry, Tracker,
};

/// In-memory state: one shared tracker (roster + game history).
/// Stats are recomputed from the current snapshot on every request.
type AppState = Data<RwLock<Tracker>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    pseudo: String,
    avatar: Option<String>,
}

#[derive(Deserialize)]
struct UpdatePlayerBody {
    pseudo: Option<String>,
    avatar: Option<String>,
}

#[derive(Deserialize)]
struct SetActiveBody {
    is_active: bool,
}

#[derive(Deserialize)]
struct RecordGameBody {
    date: NaiveDate,
    scores: Vec<ScoreEntry>,
}

/// Path segment: player id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "take-six-tracker",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Full roster (active and inactive players).
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.players())
}

/// Add a player (pseudo must be unique, case-insensitive; random avatar when omitted).
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.add_player(body.pseudo.trim(), body.avatar.as_deref()) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Update a player's pseudo and/or avatar. History shows the new values.
#[put("/api/players/{id}")]
async fn api_update_player(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<UpdatePlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.update_player(path.id, body.pseudo.as_deref(), body.avatar.as_deref()) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Activate or deactivate a player (inactive players keep their history).
#[put("/api/players/{id}/active")]
async fn api_set_player_active(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<SetActiveBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.set_player_active(path.id, body.is_active) {
        Ok(()) => HttpResponse::Ok().json(g.players()),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Delete a player. Blocked while the player appears in any recorded game.
#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.delete_player(path.id) {
        Ok(()) => HttpResponse::Ok().json(g.players()),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Bulk roster import: CSV body, rows of `pseudo` or `pseudo,avatar`.
#[post("/api/players/import")]
async fn api_import_players(state: AppState, body: String) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.import_players_csv(body.as_bytes()) {
        Ok(imported) => {
            log::info!("Imported {} player(s) from CSV", imported);
            HttpResponse::Ok().json(serde_json::json!({ "imported": imported }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Game history with participants resolved to current players, newest first.
#[get("/api/games")]
async fn api_list_games(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.games())
}

/// Record a finished game: a date plus one cumulative score per participant
/// (at least two). Winner and loser are derived from the scores.
#[post("/api/games")]
async fn api_record_game(state: AppState, body: Json<RecordGameBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let body = body.into_inner();
    match g.record_game(body.date, body.scores) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Leaderboard: players ranked by ascending average score per game.
#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(calculate_leaderboard(g.players(), &g.games()))
}

/// Per-player profile (aggregates, nemesis, lucky charm). 404 for unknown ids.
#[get("/api/players/{id}/profile")]
async fn api_player_profile(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match calculate_player_profile(path.id, g.players(), &g.games()) {
        Some(profile) => HttpResponse::Ok().json(profile),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No such player" })),
    }
}

/// Hall of fame trophies (king, collector, metronome).
#[get("/api/hall-of-fame")]
async fn api_hall_of_fame(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(calculate_hall_of_fame(g.players(), &g.games()))
}

/// Global charts: intensity/attendance series, score histogram, record games.
#[get("/api/stats/global")]
async fn api_global_stats(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(calculate_global_stats(&g.games()))
}

/// Win-rate matrix keyed by (player, table size).
#[get("/api/stats/win-rate")]
async fn api_win_rate(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(calculate_win_rate_by_table_size(g.players(), &g.games()))
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

    let state = Data::new(RwLock::new(Tracker::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_players)
            .service(api_add_player)
            .service(api_update_player)
            .service(api_set_player_active)
            .service(api_delete_player)
            .service(api_import_players)
            .service(api_list_games)
            .service(api_record_game)
            .service(api_leaderboard)
            .service(api_player_profile)
            .service(api_hall_of_fame)
            .service(api_global_stats)
            .service(api_win_rate)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
