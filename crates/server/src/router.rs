//! HTTP router construction.
//!
//! Assembles all axum routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::state::AppState;
use crate::{api, auth};

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health::health))
        // Auth
        .route("/api/register", post(auth::handlers::register))
        .route("/api/login", post(auth::handlers::login))
        .route("/api/logout", post(auth::handlers::logout))
        .route("/api/user", get(auth::handlers::current_user))
        // Session records
        .route(
            "/api/pomodoro-sessions",
            get(api::sessions::sessions_list).post(api::sessions::sessions_create),
        )
        .route(
            "/api/pomodoro-sessions/{id}/complete",
            patch(api::sessions::sessions_set_completed),
        )
        // Stats
        .route("/api/stats/daily", get(api::stats::daily_stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}
