use axum::Router;

use crate::Ctx;

pub mod health;
pub mod movies;

/// Mount all API routes
pub fn mount() -> Router<Ctx> {
    Router::new().merge(health::mount()).merge(movies::mount())
}
