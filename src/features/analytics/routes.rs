use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::analytics::handlers;
use crate::features::analytics::services::AnalyticsService;

pub fn routes(service: Arc<AnalyticsService>) -> Router {
    Router::new()
        .route(
            "/api/analytics/dashboard",
            get(handlers::get_dashboard_analytics),
        )
        .with_state(service)
}
