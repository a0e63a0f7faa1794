//! REST API: routes consumed by the admin console and the live display.
//!
//! Register on an `App` that carries `Data<TournamentStore>`:
//! `App::new().app_data(store.clone()).configure(web::configure)`.

use crate::export;
use crate::models::{GameTypeId, MatchId, PlayerId, TournamentError};
use crate::store::TournamentStore;
use actix_web::{
    get,
    http::StatusCode,
    post,
    web::{self, Data, Json, Path},
    HttpResponse, ResponseError,
};
use serde::{Deserialize, Serialize};

type AppState = Data<TournamentStore>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Error body: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ResponseError for TournamentError {
    fn status_code(&self) -> StatusCode {
        match self {
            TournamentError::NotFound { .. } => StatusCode::NOT_FOUND,
            TournamentError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TournamentError::InvalidWinner { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TournamentError::AlreadyDecided(_) => StatusCode::CONFLICT,
            TournamentError::Storage(_) | TournamentError::Poisoned => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        })
    }
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct WinnerBody {
    winner_id: PlayerId,
}

/// Path segment: game type id (e.g. /games/{id})
#[derive(Deserialize)]
struct GameTypePath {
    id: GameTypeId,
}

/// Path segment: match id (e.g. /games/{id}/winner)
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

#[get("/api/health")]
async fn api_health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-tournament",
    })
}

#[get("/game-types")]
async fn api_list_game_types(state: AppState) -> Result<HttpResponse, TournamentError> {
    Ok(HttpResponse::Ok().json(state.list_game_types()?))
}

#[post("/game-types")]
async fn api_create_game_type(
    state: AppState,
    body: Json<NameBody>,
) -> Result<HttpResponse, TournamentError> {
    let game_type = state.create_game_type(&body.name)?;
    Ok(HttpResponse::Created().json(game_type))
}

#[get("/players")]
async fn api_list_players(state: AppState) -> Result<HttpResponse, TournamentError> {
    Ok(HttpResponse::Ok().json(state.list_players()?))
}

#[post("/players")]
async fn api_create_player(
    state: AppState,
    body: Json<NameBody>,
) -> Result<HttpResponse, TournamentError> {
    let player = state.create_player(&body.name)?;
    Ok(HttpResponse::Created().json(player))
}

/// Create every missing pairing for the game type; returns the full schedule.
#[post("/games/generate/{id}")]
async fn api_generate(state: AppState, path: Path<GameTypePath>) -> Result<HttpResponse, TournamentError> {
    Ok(HttpResponse::Ok().json(state.generate(path.id)?))
}

#[get("/games/{id}")]
async fn api_list_matches(state: AppState, path: Path<GameTypePath>) -> Result<HttpResponse, TournamentError> {
    Ok(HttpResponse::Ok().json(state.list_matches(path.id)?))
}

/// Earliest unplayed match, or `null` once everything is decided.
#[get("/games/{id}/next")]
async fn api_next_match(state: AppState, path: Path<GameTypePath>) -> Result<HttpResponse, TournamentError> {
    Ok(HttpResponse::Ok().json(state.next_match(path.id)?))
}

#[get("/games/{id}/export.csv")]
async fn api_export_schedule(
    state: AppState,
    path: Path<GameTypePath>,
) -> Result<HttpResponse, TournamentError> {
    let csv = export::schedule_csv(&state.list_matches(path.id)?)?;
    Ok(csv_response(csv))
}

#[post("/games/{id}/winner")]
async fn api_record_winner(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<WinnerBody>,
) -> Result<HttpResponse, TournamentError> {
    Ok(HttpResponse::Ok().json(state.record_winner(path.id, body.winner_id)?))
}

#[get("/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> Result<HttpResponse, TournamentError> {
    Ok(HttpResponse::Ok().json(state.get_match(path.id)?))
}

#[get("/leaderboard/{id}")]
async fn api_leaderboard(state: AppState, path: Path<GameTypePath>) -> Result<HttpResponse, TournamentError> {
    Ok(HttpResponse::Ok().json(state.leaderboard(path.id)?))
}

#[get("/leaderboard/{id}/export.csv")]
async fn api_export_leaderboard(
    state: AppState,
    path: Path<GameTypePath>,
) -> Result<HttpResponse, TournamentError> {
    let csv = export::leaderboard_csv(&state.leaderboard(path.id)?)?;
    Ok(csv_response(csv))
}

/// Next match, progress and leaderboard of every game type (live display).
#[get("/overview")]
async fn api_overview(state: AppState) -> Result<HttpResponse, TournamentError> {
    Ok(HttpResponse::Ok().json(state.overview()?))
}

fn csv_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .body(body)
}

/// Register the API routes plus extractor error handlers that report malformed
/// bodies and ids as `INVALID_INPUT`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        TournamentError::InvalidInput(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        TournamentError::InvalidInput(err.to_string()).into()
    }))
    .service(api_health)
    .service(api_list_game_types)
    .service(api_create_game_type)
    .service(api_list_players)
    .service(api_create_player)
    .service(api_generate)
    .service(api_list_matches)
    .service(api_next_match)
    .service(api_export_schedule)
    .service(api_record_winner)
    .service(api_get_match)
    .service(api_leaderboard)
    .service(api_export_leaderboard)
    .service(api_overview);
}
