use axum::{Json, Router, routing::get};

use crate::{ApiResponse, Ctx};

/// Liveness check
/// GET /api/health
async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("OK"))
}

/// Mount health routes
pub fn mount() -> Router<Ctx> {
    Router::new().route("/health", get(health))
}
