//! CRUD operations for the `users` table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::error;

// ── Row type ─────────────────────────────────────────────────────────

/// A registered account. The `password` column holds the salted hash,
/// never the plaintext — and is skipped during serialization so it can
/// never leak into an API response.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

// ── Error type ───────────────────────────────────────────────────────

#[derive(Debug)]
pub enum UserStoreError {
    DuplicateUsername(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for UserStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateUsername(name) => {
                write!(f, "username '{}' is already taken", name)
            }
            Self::Database(e) => write!(f, "database error: {}", e),
        }
    }
}

impl std::error::Error for UserStoreError {}

impl From<sqlx::Error> for UserStoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e)
    }
}

impl UserStoreError {
    /// Map to an HTTP status code for API responses.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateUsername(_) => 409,
            Self::Database(_) => 500,
        }
    }
}

// ── Store ────────────────────────────────────────────────────────────

/// Stateless CRUD store for `users`.
pub struct UserStore;

impl UserStore {
    /// Create a user. `password_hash` must already be the salted hash.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> Result<User, UserStoreError> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password)
             VALUES ($1, $2)
             RETURNING id, username, password, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(e) => Err(map_unique_violation(e, username)),
        }
    }

    /// Look up a user by username (for login).
    pub async fn get_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Map a PostgreSQL unique violation (23505) to a friendly error.
fn map_unique_violation(e: sqlx::Error, username: &str) -> UserStoreError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.code().as_deref() == Some("23505") {
            return UserStoreError::DuplicateUsername(username.to_string());
        }
    }
    error!("user store database error: {}", e);
    UserStoreError::Database(e)
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_username_error() {
        let err = UserStoreError::DuplicateUsername("alice".to_string());
        assert!(err.to_string().contains("alice"));
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_password_never_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password: "deadbeef:cafe".to_string(),
            created_at: Utc::now(),
        };
        let v = serde_json::to_value(&user).unwrap();
        assert!(v.get("password").is_none());
        assert_eq!(v["username"], "alice");
    }
}
