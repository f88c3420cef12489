use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;

use crate::features::departments::handlers;
use crate::features::departments::services::DepartmentService;

/// Create routes for the departments feature (admin only)
pub fn routes(service: Arc<DepartmentService>) -> Router {
    Router::new()
        .route("/api/departments", get(handlers::get_overview))
        .route(
            "/api/departments/{department}/complaints",
            get(handlers::get_department_complaints),
        )
        .route(
            "/api/departments/{department}/stats",
            get(handlers::get_department_stats),
        )
        .route(
            "/api/departments/assign/{id}",
            patch(handlers::assign_department),
        )
        .with_state(service)
}
