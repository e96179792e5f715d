//! Game-related HTTP routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::player::Player;
use crate::error::AppError;
use crate::extractors::live_game::LiveGame;
use crate::services::game_session::SessionPhase;
use crate::state::app_state::AppState;
use crate::ws;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub players: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub game_id: Uuid,
    pub players: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PlayerStatus {
    name: String,
    connected: bool,
}

#[derive(Debug, Serialize)]
struct GameStatusResponse {
    game_id: Uuid,
    phase: SessionPhase,
    questions: usize,
    players: Vec<PlayerStatus>,
}

/// POST /api/games
///
/// Creates a session for the listed players and starts it. The game begins
/// once every player has connected over the websocket route.
async fn create_game(
    body: web::Json<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let registry = app_state.registry();
    let session = registry.create(body.players.as_slice())?;
    registry.launch(session.clone());

    let response = CreateGameResponse {
        game_id: session.id(),
        players: session.players().iter().map(|p| p.name().to_string()).collect(),
    };
    Ok(HttpResponse::Created().json(response))
}

/// GET /api/games/{game_id}
async fn get_game(
    game: LiveGame,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let LiveGame(session) = game;
    let response = GameStatusResponse {
        game_id: session.id(),
        phase: session.phase(),
        questions: app_state.bank().len(),
        players: session
            .players()
            .iter()
            .map(|p| PlayerStatus {
                name: p.name().to_string(),
                connected: p.is_connected(),
            })
            .collect(),
    };
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)));
    cfg.service(web::resource("/{game_id}").route(web::get().to(get_game)));
    cfg.service(web::resource("/{game_id}/ws").route(web::get().to(ws::session::upgrade)));
}
