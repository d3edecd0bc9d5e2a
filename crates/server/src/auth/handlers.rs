//! Register / login / logout / current-user endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::AppendHeaders;
use axum::Json;
use serde::Deserialize;

use crate::api::ErrorResponse;
use crate::auth::extract::session_token;
use crate::auth::{password, AuthSessionStore, CurrentUser};
use crate::state::AppState;
use crate::store::{User, UserStore, UserStoreError};

type SetCookie = AppendHeaders<[(header::HeaderName, String); 1]>;
type AuthError = (StatusCode, Json<ErrorResponse>);

/// Request body for register and login.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

fn err(status: StatusCode, message: impl Into<String>) -> AuthError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn internal(context: &str, e: impl std::fmt::Display) -> AuthError {
    tracing::error!("{}: {}", context, e);
    err(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to {}", context),
    )
}

fn session_cookie(state: &AppState, token: &str) -> String {
    let max_age = u64::from(state.config.auth.session_ttl_days) * 86_400;
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        state.config.auth.cookie_name, token, max_age
    )
}

fn clear_cookie(state: &AppState) -> String {
    format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        state.config.auth.cookie_name
    )
}

/// Open a session for `user` and attach the cookie to the response.
async fn start_session(
    state: &AppState,
    user: &User,
) -> Result<SetCookie, AuthError> {
    let token = AuthSessionStore::create(&state.pool, user.id, state.config.auth.session_ttl_days)
        .await
        .map_err(|e| internal("start session", e))?;
    Ok(AppendHeaders([(
        header::SET_COOKIE,
        session_cookie(state, &token),
    )]))
}

/// Register a new account
///
/// Creates the user, logs them in, and returns the user (sans password).
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "User created and logged in", body = Object),
        (status = 400, description = "Validation failure", body = Object),
        (status = 409, description = "Username taken", body = Object)
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Credentials>,
) -> Result<(StatusCode, SetCookie, Json<User>), AuthError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(err(StatusCode::BAD_REQUEST, "Username must not be empty"));
    }
    let min_len = state.config.auth.min_password_len as usize;
    if req.password.len() < min_len {
        return Err(err(
            StatusCode::BAD_REQUEST,
            format!("Password must be at least {} characters", min_len),
        ));
    }

    let hash = password::hash_password(&req.password);
    let user = UserStore::create(&state.pool, username, &hash)
        .await
        .map_err(|e| match e {
            UserStoreError::DuplicateUsername(_) => err(StatusCode::CONFLICT, e.to_string()),
            UserStoreError::Database(_) => internal("register", e),
        })?;

    tracing::info!("registered user '{}'", user.username);
    let cookie = start_session(&state, &user).await?;
    Ok((StatusCode::CREATED, cookie, Json(user)))
}

/// Log in
///
/// Verifies credentials and starts a cookie session.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Logged in", body = Object),
        (status = 401, description = "Bad credentials", body = Object)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<Credentials>,
) -> Result<(SetCookie, Json<User>), AuthError> {
    let user = UserStore::get_by_username(&state.pool, req.username.trim())
        .await
        .map_err(|e| internal("log in", e))?;

    // Same response and same hash cost for unknown user and wrong password.
    let verified = match &user {
        Some(u) => password::verify_password(&u.password, &req.password),
        None => {
            password::verify_password(password::NO_MATCH_HASH, &req.password);
            false
        }
    };
    let Some(user) = user.filter(|_| verified) else {
        return Err(err(
            StatusCode::UNAUTHORIZED,
            "Invalid username or password",
        ));
    };

    let cookie = start_session(&state, &user).await?;
    Ok((cookie, Json(user)))
}

/// Log out
///
/// Deletes the session row and clears the cookie. Idempotent.
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "Auth",
    responses(
        (status = 204, description = "Logged out")
    )
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<(StatusCode, SetCookie), AuthError> {
    if let Some(token) = session_token(&headers, &state.config.auth.cookie_name) {
        AuthSessionStore::delete(&state.pool, &token)
            .await
            .map_err(|e| internal("log out", e))?;
    }
    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(header::SET_COOKIE, clear_cookie(&state))]),
    ))
}

/// Current user
///
/// Returns the authenticated user, or 401 when not logged in.
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Auth",
    responses(
        (status = 200, description = "The logged-in user", body = Object),
        (status = 401, description = "Not logged in", body = Object)
    )
)]
pub async fn current_user(user: CurrentUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "id": user.id,
        "username": user.username,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_deserialize() {
        let json = r#"{"username":"alice","password":"hunter42"}"#;
        let req: Credentials = serde_json::from_str(json).unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.password, "hunter42");
    }
}
