use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::ingredients::handlers;
use crate::features::ingredients::services::IngredientService;

/// Create routes for the ingredient catalog
///
/// Note: Writes additionally require the admin role
pub fn routes(service: Arc<IngredientService>) -> Router {
    Router::new()
        .route(
            "/api/ingredients",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/api/ingredients/{id}",
            get(handlers::get_ingredient)
                .put(handlers::update_ingredient)
                .delete(handlers::delete_ingredient),
        )
        .with_state(service)
}
