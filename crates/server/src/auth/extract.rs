//! `CurrentUser` axum extractor: resolves the session cookie to a user
//! or rejects with 401.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;

use crate::api::ErrorResponse;
use crate::auth::AuthSessionStore;
use crate::state::AppState;

/// The authenticated user for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Pull the session token out of the `Cookie` header, if present.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name).then(|| value.to_string())
    })
}

fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Not logged in".to_string(),
        }),
    )
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.config.auth.cookie_name)
            .ok_or_else(unauthorized)?;

        let user = AuthSessionStore::lookup(&state.pool, &token)
            .await
            .map_err(|e| {
                tracing::error!("session lookup failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Failed to resolve session".to_string(),
                    }),
                )
            })?
            .ok_or_else(unauthorized)?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn finds_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; beprod_session=abc123; lang=en");
        assert_eq!(
            session_token(&headers, "beprod_session").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn missing_cookie_header_yields_none() {
        assert!(session_token(&HeaderMap::new(), "beprod_session").is_none());
    }

    #[test]
    fn other_cookie_names_do_not_match() {
        let headers = headers_with_cookie("beprod_session_old=zzz");
        assert!(session_token(&headers, "beprod_session").is_none());
    }
}
