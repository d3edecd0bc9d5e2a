//! Login-session tokens in the `auth_sessions` table.

use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use sqlx::PgPool;

use crate::store::User;

const TOKEN_LEN: usize = 32;

/// Stateless store for `auth_sessions`.
pub struct AuthSessionStore;

impl AuthSessionStore {
    /// Start a session for a user, returning the new token.
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        ttl_days: u32,
    ) -> Result<String, sqlx::Error> {
        let mut bytes = [0u8; TOKEN_LEN];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        let expires_at = Utc::now() + Duration::days(i64::from(ttl_days));

        sqlx::query("INSERT INTO auth_sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(&token)
            .bind(user_id)
            .bind(expires_at)
            .execute(pool)
            .await?;

        Ok(token)
    }

    /// Resolve a token to its user. Expired sessions are deleted on sight
    /// and read as missing.
    pub async fn lookup(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query("DELETE FROM auth_sessions WHERE token = $1 AND expires_at <= now()")
            .bind(token)
            .execute(pool)
            .await?;

        let row = sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.password, u.created_at
             FROM auth_sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token = $1 AND s.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// End a session. Deleting an unknown token is not an error.
    pub async fn delete(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM auth_sessions WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(())
    }
}
