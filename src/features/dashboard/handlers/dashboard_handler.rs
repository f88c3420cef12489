use axum::{extract::State, Json};
use std::sync::Arc;

use crate::features::auth::models::Session;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Landing page overview: recent complaints and this week's analytics
#[utoipa::path(
    get,
    path = "/api/dashboard/overview",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard overview; a failed half is listed in `errors`", body = ApiResponse<DashboardOverviewDto>),
        (status = 401, description = "Not signed in")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_overview(
    _session: Session,
    State(service): State<Arc<DashboardService>>,
) -> Json<ApiResponse<DashboardOverviewDto>> {
    let overview = service.overview().await;
    Json(ApiResponse::success(Some(overview), None, None))
}
