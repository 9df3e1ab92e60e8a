use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{error_response, AppState};

/// Drops every cached leaderboard, e.g. after an out-of-band `ingest`
pub async fn invalidate_cache(State(state): State<Arc<AppState>>) -> Response {
    match state.standings_cache() {
        Ok(mut cache) => {
            cache.invalidate_all();
            log::info!("Standings cache cleared");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(e),
    }
}
