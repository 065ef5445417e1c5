use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{game::GameSnapshot, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub game_id: Uuid,
    pub snapshot: GameSnapshot,
}

/// Start a new single-player game
pub async fn create_game(State(state): State<Arc<AppState>>) -> (StatusCode, Json<GameResponse>) {
    let session = state.create_session();
    let snapshot = session.snapshot().await;
    (
        StatusCode::CREATED,
        Json(GameResponse {
            game_id: session.game_id,
            snapshot,
        }),
    )
}

/// Current snapshot of a game
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, StatusCode> {
    let session = state.session(&game_id).ok_or_else(|| {
        tracing::debug!("Game {} not found", game_id);
        StatusCode::NOT_FOUND
    })?;

    Ok(Json(GameResponse {
        game_id,
        snapshot: session.snapshot().await,
    }))
}
