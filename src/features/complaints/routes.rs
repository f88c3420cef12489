use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;

/// Create routes for the complaints feature
pub fn routes(service: Arc<ComplaintService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/complaints",
            get(handlers::list_complaints)
                // image + audio + text fields
                .post(handlers::submit_complaint)
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route("/api/complaints/{id}", get(handlers::get_complaint))
        .route("/api/complaints/{id}/status", patch(handlers::update_status))
        .route("/api/complaints/{id}/resolve", post(handlers::resolve_complaint))
        .with_state(service)
}
