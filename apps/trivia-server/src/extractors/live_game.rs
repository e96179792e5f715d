use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::game_session::TriviaSession;
use crate::state::app_state::AppState;

/// Live game session named by the `game_id` path parameter.
pub struct LiveGame(pub Arc<TriviaSession>);

impl LiveGame {
    fn extract(req: &HttpRequest) -> Result<Self, AppError> {
        let raw = req.match_info().get("game_id").ok_or_else(|| {
            AppError::bad_request(ErrorCode::InvalidGameId, "Missing game_id parameter")
        })?;

        let game_id = Uuid::parse_str(raw).map_err(|_| {
            AppError::bad_request(ErrorCode::InvalidGameId, format!("Invalid game id: {raw}"))
        })?;

        let app_state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::internal("AppState not available"))?;

        let session = app_state.registry.get(game_id)?;
        Ok(LiveGame(session))
    }
}

impl FromRequest for LiveGame {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}
