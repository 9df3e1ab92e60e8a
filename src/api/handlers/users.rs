use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::database::{self, NewUser};
use super::{error_response, AppState};

/// 409 when another user already holds the email
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(new_user): Json<NewUser>,
) -> Response {
    match database::get_connection(&state.pool)
        .and_then(|mut conn| database::users::insert_user(&mut conn, &new_user))
    {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => error_response(e),
    }
}
