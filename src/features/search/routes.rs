use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::search::handlers;
use crate::features::search::services::SearchService;

/// Create routes for recipe search
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<SearchService>) -> Router {
    Router::new()
        .route(
            "/api/recipes/search",
            get(handlers::search_recipes).post(handlers::search_recipes_json),
        )
        .with_state(service)
}
