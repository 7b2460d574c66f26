//! Game-related HTTP routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::domain::{DeckConfig, SessionId};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// Optional body of `POST /api/games`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub deck: Option<DeckConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub game_id: SessionId,
}

/// POST /api/games
///
/// Creates a waiting game. An empty body uses the server's default deck;
/// `{"deck": {"CFRF": 3, ...}}` supplies a custom one.
async fn create_game(
    body: web::Bytes,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CreateGameRequest::default()
    } else {
        serde_json::from_slice::<CreateGameRequest>(&body).map_err(|e| {
            AppError::bad_request(ErrorCode::BadRequest, format!("Invalid request body: {e}"))
        })?
    };

    let deck = request
        .deck
        .as_ref()
        .unwrap_or_else(|| app_state.default_deck());
    let game_id = app_state.registry().create(deck)?;
    info!(session_id = %game_id, custom_deck = request.deck.is_some(), "game created");

    Ok(HttpResponse::Ok().json(CreateGameResponse { game_id }))
}

/// GET /api/games/{game_id}
///
/// Current snapshot of the game.
async fn get_game(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    let id = Uuid::parse_str(&raw).map_err(|_| {
        AppError::invalid(ErrorCode::InvalidGameId, format!("Invalid game id: {raw}"))
    })?;

    let snapshot = app_state.registry().snapshot(id)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_game))
        .route("/{game_id}", web::get().to(get_game));
}
