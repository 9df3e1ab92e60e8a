use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::info;
use serde::Deserialize;
use std::sync::Arc;

use crate::database;
use super::{error_response, AppState};

#[derive(Debug, Deserialize)]
pub struct RenamePlayer {
    pub name: String,
}

/// Renames a player; cached standings carry the old name, so all of them go
pub async fn rename_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<RenamePlayer>,
) -> Response {
    let name = body.name.trim();
    if name.is_empty() {
        return (StatusCode::BAD_REQUEST, "Player name must not be empty").into_response();
    }

    let player = match database::get_connection(&state.pool)
        .and_then(|mut conn| database::players::rename_player(&mut conn, &id, name))
    {
        Ok(player) => player,
        Err(e) => return error_response(e),
    };

    match state.standings_cache() {
        Ok(mut cache) => cache.invalidate_all(),
        Err(e) => return error_response(e),
    }

    Json(player).into_response()
}

/// 409 while any match or roster entry still references the player
pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match database::get_connection(&state.pool)
        .and_then(|mut conn| database::players::delete_player(&mut conn, &id))
    {
        Ok(()) => {
            info!("Deleted player {}", id);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(e),
    }
}
