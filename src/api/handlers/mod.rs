use anyhow::anyhow;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use log::error;
use serde::Deserialize;
use std::sync::{Mutex, MutexGuard};

use crate::config::settings::AppConfig;
use crate::database::DbPool;
use crate::errors::LeagueError;
use crate::stats::{MatchScope, StandingsCache};

pub mod admin;
pub mod league_games;
pub mod matches;
pub mod players;
pub mod stats;
pub mod users;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
    pub standings: Mutex<StandingsCache>,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self {
            pool,
            config,
            standings: Mutex::new(StandingsCache::new()),
        }
    }

    pub fn standings_cache(&self) -> anyhow::Result<MutexGuard<'_, StandingsCache>> {
        self.standings
            .lock()
            .map_err(|_| anyhow!("Standings cache lock poisoned"))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsParams {
    pub league_game_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl StatsParams {
    pub fn scope(&self) -> MatchScope {
        MatchScope {
            league_game_id: self.league_game_id.clone(),
            from: self.from,
            to: self.to,
        }
    }
}

/// Typed league errors become 404/409; anything else is a 500
pub fn error_response(e: anyhow::Error) -> Response {
    let status = match e.downcast_ref::<LeagueError>() {
        Some(LeagueError::LeagueGameNotFound(_) | LeagueError::PlayerNotFound(_)) => StatusCode::NOT_FOUND,
        Some(
            LeagueError::AlreadyCompleted(_)
            | LeagueError::PlayerInUse { .. }
            | LeagueError::DuplicateEmail(_),
        ) => StatusCode::CONFLICT,
        Some(LeagueError::InvalidEnum { .. }) => StatusCode::BAD_REQUEST,
        None => {
            error!("Request failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, format!("{:#}", e)).into_response()
}
