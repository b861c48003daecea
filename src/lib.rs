pub mod config;
pub mod error;
pub mod imdb;
pub mod routes;

use std::sync::Arc;

use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::imdb::ImdbProvider;

/// Shared application state passed to every handler
#[derive(Clone)]
pub struct Ctx {
    pub imdb: Arc<ImdbProvider>,
}

impl Ctx {
    #[must_use]
    pub fn new(imdb: ImdbProvider) -> Self {
        Self {
            imdb: Arc::new(imdb),
        }
    }
}

/// Uniform response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            message: "OK".to_string(),
            data: Some(data),
        }
    }
}

/// Handler result type
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, error::ApiError>;

/// Build the application router
pub fn app(ctx: Ctx) -> Router {
    Router::new()
        .nest("/api", routes::api::mount())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
