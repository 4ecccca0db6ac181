use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::features::reports::handlers;
use crate::features::sessions::services::SessionService;
use crate::shared::constants::MAX_IMAGE_SIZE;

/// Create routes for the reports feature
pub fn routes(session_service: Arc<SessionService>) -> Router {
    Router::new()
        .route(
            "/api/sessions/{id}/reports",
            // Allow body size up to MAX_IMAGE_SIZE + buffer for multipart overhead
            get(handlers::list_reports)
                .post(handlers::submit_report)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024)),
        )
        .route("/api/reports/options", get(handlers::get_options))
        .with_state(session_service)
}
