//! HTTP handlers, grouped by concern.

pub mod doc;
pub mod health;
pub mod sessions;
pub mod stats;

use serde::Serialize;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
