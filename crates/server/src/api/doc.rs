//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers into a single spec,
//! served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BeProd API",
        version = "0.1.0",
        description = "Pomodoro session persistence with cookie-session authentication.",
    ),
    tags(
        (name = "Health", description = "Server readiness"),
        (name = "Auth", description = "Register, login, logout, current user"),
        (name = "Sessions", description = "Per-user Pomodoro session records"),
        (name = "Stats", description = "Daily activity aggregates"),
    ),
    paths(
        crate::api::health::health,
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::current_user,
        crate::api::sessions::sessions_create,
        crate::api::sessions::sessions_list,
        crate::api::sessions::sessions_set_completed,
        crate::api::stats::daily_stats,
    ),
    components(schemas(
        crate::api::ErrorResponse,
        crate::api::health::HealthResponse,
        crate::auth::handlers::Credentials,
        crate::store::sessions::CreateSessionRequest,
        crate::api::sessions::SetCompletedRequest,
        crate::api::stats::DailyStatsQuery,
    ))
)]
pub struct ApiDoc;
