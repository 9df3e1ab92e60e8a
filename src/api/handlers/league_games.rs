use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::info;
use std::sync::Arc;

use crate::database;
use crate::services::league_games::{self, ScoredLeagueGame};
use super::{error_response, AppState};

/// Recomputes the team totals from the linked matches, persists and returns them
pub async fn get_league_game_score(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let result = database::get_connection(&state.pool)
        .and_then(|mut conn| league_games::rescore_league_game(&mut conn, &id));

    respond(result)
}

pub async fn complete_league_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let result = database::get_connection(&state.pool)
        .and_then(|mut conn| league_games::complete_league_game(&mut conn, &id));

    respond(result)
}

pub async fn delete_league_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let unlinked = match database::get_connection(&state.pool)
        .and_then(|mut conn| league_games::delete_league_game(&mut conn, &id))
    {
        Ok(unlinked) => unlinked,
        Err(e) => return error_response(e),
    };

    // Unlinked matches now sit outside every scope filtered on this game
    match state.standings_cache() {
        Ok(mut cache) => {
            let dropped = cache.invalidate_league_game(&id);
            info!(
                "Deleted league game {} ({} matches unlinked, {} cached standings dropped)",
                id,
                unlinked.len(),
                dropped
            );
        }
        Err(e) => return error_response(e),
    }

    StatusCode::NO_CONTENT.into_response()
}

fn respond(result: anyhow::Result<ScoredLeagueGame>) -> Response {
    match result {
        Ok(scored) => Json(scored).into_response(),
        Err(e) => error_response(e),
    }
}
