use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    admin::invalidate_cache,
    league_games::{complete_league_game, delete_league_game, get_league_game_score},
    matches::record_match,
    players::{delete_player, rename_player},
    stats::{get_doubles_stats, get_singles_stats, get_summary},
    users::create_user,
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/stats/singles", get(get_singles_stats))
        .route("/api/stats/doubles", get(get_doubles_stats))
        .route("/api/stats/summary", get(get_summary))
        .route("/api/league-games/:id", delete(delete_league_game))
        .route("/api/league-games/:id/score", get(get_league_game_score))
        .route("/api/league-games/:id/complete", post(complete_league_game))
        .route("/api/matches", post(record_match))
        .route("/api/players/:id", patch(rename_player).delete(delete_player))
        .route("/api/users", post(create_user))
        .route("/api/cache/invalidate", post(invalidate_cache))
        .with_state(state)
}
