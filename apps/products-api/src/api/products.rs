//! Products API routes

use axum::Router;
use domain_products::{PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Both response conventions over one service:
/// - `/products`: flat objects
/// - `/v2/products`: JSON:API documents
///
/// Collections also answer with a trailing slash.
pub fn router(state: &AppState) -> Router {
    let service = ProductService::new(PgProductRepository::new(state.db.clone()));

    Router::new()
        .merge(handlers::flat_router(service.clone(), "/products"))
        .merge(handlers::json_api_router(
            service,
            "/v2/products",
            state.config.json_api_base(),
        ))
}
