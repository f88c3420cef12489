use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::models::Session;
use crate::features::map::dtos::*;
use crate::features::map::services::MapService;
use crate::shared::types::{ApiResponse, Meta};

/// Complaint markers as GeoJSON
#[utoipa::path(
    get,
    path = "/api/map/complaints",
    tag = "map",
    params(MapQuery),
    responses(
        (status = 200, description = "Complaint markers", body = ApiResponse<MapFeatureCollectionDto>),
        (status = 401, description = "Not signed in"),
        (status = 502, description = "Backend unavailable")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_map_complaints(
    _session: Session,
    State(service): State<Arc<MapService>>,
    Query(query): Query<MapQuery>,
) -> Result<Json<ApiResponse<MapFeatureCollectionDto>>, AppError> {
    let collection = service.complaints(&query).await?;
    let total = collection.features.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(collection),
        None,
        Some(Meta { total }),
    )))
}

/// Heatmap points as GeoJSON
#[utoipa::path(
    get,
    path = "/api/map/heatmap",
    tag = "map",
    params(HeatmapQuery),
    responses(
        (status = 200, description = "Heatmap points", body = ApiResponse<MapFeatureCollectionDto>),
        (status = 401, description = "Not signed in")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_heatmap(
    _session: Session,
    State(service): State<Arc<MapService>>,
    Query(query): Query<HeatmapQuery>,
) -> Result<Json<ApiResponse<MapFeatureCollectionDto>>, AppError> {
    let collection = service.heatmap(&query).await?;
    let total = collection.features.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(collection),
        None,
        Some(Meta { total }),
    )))
}
