use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::api::models::RecordedMatch;
use crate::database::{self, NewMatch};
use crate::services::league_games;
use super::{error_response, AppState};

/// Records a result and drops every cached leaderboard it could change
pub async fn record_match(
    State(state): State<Arc<AppState>>,
    Json(new_match): Json<NewMatch>,
) -> Response {
    let recorded = match database::get_connection(&state.pool)
        .and_then(|mut conn| league_games::record_match(&mut conn, &new_match))
    {
        Ok(recorded) => recorded,
        Err(e) => return error_response(e),
    };

    let invalidated = match state.standings_cache() {
        Ok(mut cache) => cache.invalidate_for_match(&recorded),
        Err(e) => return error_response(e),
    };

    (StatusCode::CREATED, Json(RecordedMatch { recorded, invalidated })).into_response()
}
