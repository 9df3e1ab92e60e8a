use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::api::models::{StandingsResponse, SummaryResponse};
use crate::database::{self, DbPool};
use crate::domain::{Snapshot, SnapshotSource};
use crate::stats::{compute_doubles_stats_in_scope, compute_singles_stats_in_scope, DashboardSummary};
use super::{error_response, AppState, StatsParams};

fn load_snapshot(pool: &DbPool) -> anyhow::Result<Snapshot> {
    let mut conn = database::get_connection(pool)?;
    conn.snapshot()
}

pub async fn get_singles_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Response {
    let scope = params.scope();

    let standings = state.standings_cache().and_then(|mut cache| {
        cache.singles_or_compute(&scope, || {
            let snapshot = load_snapshot(&state.pool)?;
            Ok(compute_singles_stats_in_scope(
                &snapshot.players,
                &snapshot.matches,
                &scope,
                &state.config.scoring,
            ))
        })
    });

    match standings {
        Ok(standings) => Json(StandingsResponse::from_standings(standings, params.limit)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_doubles_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Response {
    let scope = params.scope();

    let standings = state.standings_cache().and_then(|mut cache| {
        cache.doubles_or_compute(&scope, || {
            let snapshot = load_snapshot(&state.pool)?;
            Ok(compute_doubles_stats_in_scope(
                &snapshot.players,
                &snapshot.matches,
                &scope,
                &state.config.scoring,
            ))
        })
    });

    match standings {
        Ok(standings) => Json(StandingsResponse::from_standings(standings, params.limit)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_summary(State(state): State<Arc<AppState>>) -> Response {
    match load_snapshot(&state.pool) {
        Ok(snapshot) => Json(SummaryResponse::from(DashboardSummary::from_snapshot(&snapshot))).into_response(),
        Err(e) => error_response(e),
    }
}
