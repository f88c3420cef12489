use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::departments::dtos::*;
use crate::features::departments::models::Department;
use crate::features::departments::services::DepartmentService;
use crate::shared::types::{ApiResponse, Meta};

fn parse_department(raw: &str) -> Result<Department, AppError> {
    Department::from_label(raw)
        .ok_or_else(|| AppError::NotFound(format!("Unknown department: {}", raw)))
}

/// Stats for every department with portal-wide totals
#[utoipa::path(
    get,
    path = "/api/departments",
    tag = "departments",
    responses(
        (status = 200, description = "Department stats", body = ApiResponse<DepartmentsOverviewDto>),
        (status = 403, description = "Admin access required")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_overview(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
) -> Result<Json<ApiResponse<DepartmentsOverviewDto>>, AppError> {
    let overview = service.overview().await;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}

/// Complaints of one department, filtered, with status counts
#[utoipa::path(
    get,
    path = "/api/departments/{department}/complaints",
    tag = "departments",
    params(
        ("department" = String, Path, description = "Department label or keyword, e.g. `Roads Department` or `roads`"),
        DepartmentComplaintsQuery
    ),
    responses(
        (status = 200, description = "Department complaints", body = ApiResponse<DepartmentComplaintsDto>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Unknown department")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_department_complaints(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
    Path(department): Path<String>,
    Query(query): Query<DepartmentComplaintsQuery>,
) -> Result<Json<ApiResponse<DepartmentComplaintsDto>>, AppError> {
    let department = parse_department(&department)?;
    let dto = service.complaints(department, query).await?;
    let total = dto.complaints.len() as i64;
    Ok(Json(ApiResponse::success(Some(dto), None, Some(Meta { total }))))
}

/// Stats for one department
#[utoipa::path(
    get,
    path = "/api/departments/{department}/stats",
    tag = "departments",
    params(("department" = String, Path, description = "Department label or keyword")),
    responses(
        (status = 200, description = "Department stats", body = ApiResponse<DepartmentStatsDto>),
        (status = 404, description = "Unknown department")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_department_stats(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
    Path(department): Path<String>,
) -> Result<Json<ApiResponse<DepartmentStatsDto>>, AppError> {
    let department = parse_department(&department)?;
    let stats = service.stats(department).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Reassign a complaint to another department (admin)
#[utoipa::path(
    patch,
    path = "/api/departments/assign/{id}",
    tag = "departments",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body = AssignDepartmentDto,
    responses(
        (status = 200, description = "Complaint reassigned", body = ApiResponse<ReassignmentDto>),
        (status = 400, description = "No department selected"),
        (status = 409, description = "A reassignment for this complaint is already running"),
        (status = 502, description = "Reassignment failed")
    ),
    security(("session_cookie" = []))
)]
pub async fn assign_department(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<AssignDepartmentDto>,
) -> Result<Json<ApiResponse<ReassignmentDto>>, AppError> {
    let result = service
        .reassign(&id, dto.department, Some(session.actor()))
        .await?;
    let message = format!("Complaint reassigned to {}", result.department);
    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}
