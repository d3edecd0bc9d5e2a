//! CRUD and aggregation for the `pomodoro_sessions` table.
//!
//! All queries are scoped to a `user_id`: a user can only ever see or
//! modify their own session records.

use beprod_core::SessionType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::error;

/// List queries never return more than this many rows.
const LIST_LIMIT: i64 = 100;

/// Phase durations above this are rejected as nonsense (24h in seconds).
const MAX_DURATION_SECONDS: i32 = 24 * 60 * 60;

// ── Row and request types ────────────────────────────────────────────

/// A persisted Pomodoro session record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SessionRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub session_type: String,
    pub name: String,
    pub duration_seconds: i32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for recording a session.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateSessionRequest {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "work")]
    pub session_type: SessionType,
    pub name: String,
    pub duration_seconds: i32,
    /// Defaults to `true` — the timer only posts finished phases.
    pub completed: Option<bool>,
}

/// One day of aggregated activity for the history chart.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DailyStat {
    pub day: NaiveDate,
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub completed_cycles: i64,
}

// ── Error type ───────────────────────────────────────────────────────

#[derive(Debug)]
pub enum SessionStoreError {
    InvalidDuration(i32),
    NotFound(i64),
    Database(sqlx::Error),
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDuration(d) => write!(
                f,
                "invalid duration_seconds {}: must be between 0 and {}",
                d, MAX_DURATION_SECONDS
            ),
            Self::NotFound(id) => write!(f, "session not found: {}", id),
            Self::Database(e) => write!(f, "database error: {}", e),
        }
    }
}

impl std::error::Error for SessionStoreError {}

impl From<sqlx::Error> for SessionStoreError {
    fn from(e: sqlx::Error) -> Self {
        error!("session store database error: {}", e);
        Self::Database(e)
    }
}

impl SessionStoreError {
    /// Map to an HTTP status code for API responses.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidDuration(_) => 400,
            Self::NotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

// ── Store ────────────────────────────────────────────────────────────

/// Stateless store for `pomodoro_sessions`.
pub struct SessionStore;

impl SessionStore {
    /// Record a session for `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        req: CreateSessionRequest,
    ) -> Result<SessionRecord, SessionStoreError> {
        if !(0..=MAX_DURATION_SECONDS).contains(&req.duration_seconds) {
            return Err(SessionStoreError::InvalidDuration(req.duration_seconds));
        }

        let completed = req.completed.unwrap_or(true);

        let row = sqlx::query_as::<_, SessionRecord>(
            "INSERT INTO pomodoro_sessions (user_id, session_type, name, duration_seconds, completed)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, user_id, session_type, name, duration_seconds, completed, created_at",
        )
        .bind(user_id)
        .bind(req.session_type.as_str())
        .bind(&req.name)
        .bind(req.duration_seconds)
        .bind(completed)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// The user's records, newest first, capped at 100.
    pub async fn list(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<SessionRecord>, SessionStoreError> {
        let rows = sqlx::query_as::<_, SessionRecord>(
            "SELECT id, user_id, session_type, name, duration_seconds, completed, created_at
             FROM pomodoro_sessions
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Flip the completed flag on one of the user's records.
    ///
    /// Rows belonging to other users are indistinguishable from missing
    /// rows: both yield `NotFound`.
    pub async fn set_completed(
        pool: &PgPool,
        user_id: i64,
        id: i64,
        completed: bool,
    ) -> Result<SessionRecord, SessionStoreError> {
        let row = sqlx::query_as::<_, SessionRecord>(
            "UPDATE pomodoro_sessions SET completed = $3
             WHERE id = $1 AND user_id = $2
             RETURNING id, user_id, session_type, name, duration_seconds, completed, created_at",
        )
        .bind(id)
        .bind(user_id)
        .bind(completed)
        .fetch_optional(pool)
        .await?;

        row.ok_or(SessionStoreError::NotFound(id))
    }

    /// Per-day work/break minutes and completed work cycles over the last
    /// `days` days (today included). Days without activity are absent.
    pub async fn daily_stats(
        pool: &PgPool,
        user_id: i64,
        days: u32,
    ) -> Result<Vec<DailyStat>, SessionStoreError> {
        let rows = sqlx::query_as::<_, DailyStat>(
            "SELECT (created_at AT TIME ZONE 'UTC')::date AS day,
                    COALESCE(SUM(duration_seconds) FILTER (WHERE session_type = 'work'), 0) / 60
                        AS work_minutes,
                    COALESCE(SUM(duration_seconds) FILTER (WHERE session_type <> 'work'), 0) / 60
                        AS break_minutes,
                    COUNT(*) FILTER (WHERE session_type = 'work' AND completed)
                        AS completed_cycles
             FROM pomodoro_sessions
             WHERE user_id = $1
               AND created_at >= now() - ($2 * INTERVAL '1 day')
             GROUP BY day
             ORDER BY day",
        )
        .bind(user_id)
        .bind(i32::try_from(days).unwrap_or(7))
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_duration_error() {
        let err = SessionStoreError::InvalidDuration(-5);
        assert!(err.to_string().contains("-5"));
        assert_eq!(err.status_code(), 400);

        let err = SessionStoreError::InvalidDuration(MAX_DURATION_SECONDS + 1);
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_not_found_error() {
        let err = SessionStoreError::NotFound(42);
        assert!(err.to_string().contains("42"));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_create_request_accepts_wire_format() {
        let json = r#"{"type":"long_break","name":"Long Break","duration_seconds":900}"#;
        let req: CreateSessionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.session_type, SessionType::LongBreak);
        assert_eq!(req.duration_seconds, 900);
        assert!(req.completed.is_none());
    }

    #[test]
    fn test_create_request_rejects_unknown_type() {
        let json = r#"{"type":"nap","name":"Nap","duration_seconds":60}"#;
        assert!(serde_json::from_str::<CreateSessionRequest>(json).is_err());
    }

    #[test]
    fn test_record_serializes_with_type_key() {
        let rec = SessionRecord {
            id: 1,
            user_id: 7,
            session_type: "work".to_string(),
            name: "Work Session".to_string(),
            duration_seconds: 1500,
            completed: true,
            created_at: Utc::now(),
        };
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["type"], "work");
        assert!(v.get("session_type").is_none());
    }
}
