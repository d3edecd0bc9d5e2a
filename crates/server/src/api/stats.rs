//! Daily aggregate endpoint backing the history chart.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::state::AppState;
use crate::store::{DailyStat, SessionStore};

use super::ErrorResponse;

const MAX_DAYS: u32 = 365;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct DailyStatsQuery {
    /// Window size in days, default 7, capped at 365.
    pub days: Option<u32>,
}

/// Daily work/break minutes and completed cycles
#[utoipa::path(
    get,
    path = "/api/stats/daily",
    tag = "Stats",
    params(
        ("days" = Option<u32>, Query, description = "Window size in days (default 7)")
    ),
    responses(
        (status = 200, description = "Per-day aggregates, oldest first", body = Object),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
pub async fn daily_stats(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Query(query): Query<DailyStatsQuery>,
) -> Result<Json<Vec<DailyStat>>, (StatusCode, Json<ErrorResponse>)> {
    let days = query.days.unwrap_or(7).clamp(1, MAX_DAYS);
    SessionStore::daily_stats(&state.pool, user.id, days)
        .await
        .map(Json)
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_to_none() {
        let q: DailyStatsQuery = serde_json::from_str("{}").unwrap();
        assert!(q.days.is_none());
    }
}
