use axum::{routing::get, Router};

use crate::features::auth::handler;

/// Protected auth routes (require JWT authentication)
pub fn protected_routes() -> Router {
    Router::new().route("/api/auth/me", get(handler::get_me))
}
