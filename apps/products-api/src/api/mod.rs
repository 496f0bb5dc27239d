//! API routes module

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Routes nested under `/api` by `create_router`
pub fn routes(state: &AppState) -> Router {
    products::router(state)
}

/// `/ready` with the PostgreSQL check, merged at the root next to `/health`
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
