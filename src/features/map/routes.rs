use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::map::handlers;
use crate::features::map::services::MapService;

pub fn routes(service: Arc<MapService>) -> Router {
    Router::new()
        .route("/api/map/complaints", get(handlers::get_map_complaints))
        .route("/api/map/heatmap", get(handlers::get_heatmap))
        .with_state(service)
}
