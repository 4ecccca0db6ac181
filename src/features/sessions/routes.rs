use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::sessions::handlers;
use crate::features::sessions::services::SessionService;

/// Create routes for the sessions feature
pub fn routes(service: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/sessions", post(handlers::create_session))
        .route(
            "/api/sessions/{id}",
            get(handlers::get_session).delete(handlers::end_session),
        )
        .with_state(service)
}
