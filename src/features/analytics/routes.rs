use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::analytics::handlers;
use crate::features::analytics::services::AnalyticsService;

/// Create routes for recipe analytics
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<AnalyticsService>) -> Router {
    Router::new()
        .route("/api/recipes/analytics", get(handlers::get_analytics))
        .with_state(service)
}
