//! Pomodoro session endpoints: record, list, and patch the completed flag.
//!
//! Every handler requires a [`CurrentUser`]; records are scoped to the
//! authenticated user at the store level.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::state::AppState;
use crate::store::{CreateSessionRequest, SessionRecord, SessionStore, SessionStoreError};

use super::ErrorResponse;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn store_error(e: SessionStoreError) -> ApiError {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Record a completed session
///
/// The timer posts one record per finished phase.
#[utoipa::path(
    post,
    path = "/api/pomodoro-sessions",
    tag = "Sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session recorded", body = Object),
        (status = 400, description = "Invalid session", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
pub async fn sessions_create(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionRecord>), ApiError> {
    SessionStore::create(&state.pool, user.id, req)
        .await
        .map(|row| (StatusCode::CREATED, Json(row)))
        .map_err(store_error)
}

/// List the user's sessions
///
/// Newest first, capped at 100 rows.
#[utoipa::path(
    get,
    path = "/api/pomodoro-sessions",
    tag = "Sessions",
    responses(
        (status = 200, description = "Session records", body = Object),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
pub async fn sessions_list(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<SessionRecord>>, ApiError> {
    SessionStore::list(&state.pool, user.id)
        .await
        .map(Json)
        .map_err(store_error)
}

/// Request body for the completed-flag patch. The body is optional;
/// a missing body or missing field reads as `completed: false`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct SetCompletedRequest {
    #[serde(default)]
    pub completed: bool,
}

/// Set the completed flag on a session
#[utoipa::path(
    patch,
    path = "/api/pomodoro-sessions/{id}/complete",
    tag = "Sessions",
    params(
        ("id" = i64, Path, description = "Session record ID")
    ),
    request_body = SetCompletedRequest,
    responses(
        (status = 200, description = "Updated record", body = Object),
        (status = 404, description = "No such session for this user", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
pub async fn sessions_set_completed(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(id): Path<i64>,
    body: Option<Json<SetCompletedRequest>>,
) -> Result<Json<SessionRecord>, ApiError> {
    let completed = body.map(|Json(req)| req.completed).unwrap_or(false);
    SessionStore::set_completed(&state.pool, user.id, id, completed)
        .await
        .map(Json)
        .map_err(store_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_flag_defaults_to_false() {
        let req: SetCompletedRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.completed);

        let req: SetCompletedRequest = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert!(req.completed);
    }
}
