use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::profiles::handlers;
use crate::features::profiles::services::ProfileStore;

/// Create routes for the profiles feature
///
/// Note: This feature requires authentication; the listing requires the admin role
pub fn routes(store: Arc<dyn ProfileStore>) -> Router {
    Router::new()
        .route(
            "/api/profile/me",
            get(handlers::get_my_profile).put(handlers::update_my_profile),
        )
        .route("/api/profiles", get(handlers::list_profiles))
        .with_state(store)
}
