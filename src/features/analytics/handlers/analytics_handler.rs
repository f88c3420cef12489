use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::analytics::dtos::{AnalyticsDashboardDto, AnalyticsQuery, AnalyticsViewDto};
use crate::features::analytics::services::AnalyticsService;
use crate::features::auth::models::Session;
use crate::shared::types::ApiResponse;

/// Analytics dashboard
#[utoipa::path(
    get,
    path = "/api/analytics/dashboard",
    tag = "analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Dashboard analytics", body = ApiResponse<AnalyticsDashboardDto>),
        (status = 401, description = "Not signed in"),
        (status = 502, description = "Backend unavailable")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_dashboard_analytics(
    _session: Session,
    State(service): State<Arc<AnalyticsService>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<ApiResponse<AnalyticsDashboardDto>>, AppError> {
    let days_back = query.days_back();
    let analytics = service.dashboard(days_back).await?;
    let view = AnalyticsViewDto::from(&analytics);
    Ok(Json(ApiResponse::success(
        Some(AnalyticsDashboardDto {
            days_back,
            analytics,
            view,
        }),
        None,
        None,
    )))
}
