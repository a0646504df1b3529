use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::recipes::handlers;
use crate::features::recipes::services::RecipeStore;

/// Create routes for the recipes feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<dyn RecipeStore>) -> Router {
    Router::new()
        .route(
            "/api/recipes",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .route(
            "/api/recipes/{id}",
            get(handlers::get_recipe)
                .put(handlers::update_recipe)
                .delete(handlers::delete_recipe),
        )
        .route(
            "/api/recipes/{id}/ingredients",
            post(handlers::add_recipe_ingredient),
        )
        .route(
            "/api/recipes/{id}/ingredients/{ingredient_id}",
            delete(handlers::remove_recipe_ingredient),
        )
        .with_state(service)
}
