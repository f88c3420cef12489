use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::{AppJson, MaybeSession};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::models::Session;
use crate::features::complaints::dtos::{
    ComplaintListQuery, ComplaintPageDto, ComplaintResponseDto, ResolveComplaintDto,
    SubmissionReceiptDto, UpdateStatusDto, UploadComplaintDto,
};
use crate::features::complaints::models::{
    Attachment, ComplaintDraft, GeoPoint, LocationFix, MAX_ATTACHMENT_SIZE,
};
use crate::features::complaints::services::ComplaintService;
use crate::shared::types::{ApiResponse, Meta};

/// List complaints visible to the caller, filtered and paged
#[utoipa::path(
    get,
    path = "/api/complaints",
    tag = "complaints",
    params(ComplaintListQuery),
    responses(
        (status = 200, description = "One page of complaints", body = ApiResponse<ComplaintPageDto>),
        (status = 401, description = "No session"),
        (status = 502, description = "Complaint service unavailable")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_complaints(
    session: Session,
    State(service): State<Arc<ComplaintService>>,
    Query(query): Query<ComplaintListQuery>,
) -> Result<Json<ApiResponse<ComplaintPageDto>>, AppError> {
    let complaints = service.list_for_session(&session).await?;

    let view = query.into_view();
    let (page, pagination) = view.render(&complaints);
    let total = pagination.total_items as i64;

    let dto = ComplaintPageDto {
        items: page.into_iter().map(ComplaintResponseDto::from).collect(),
        pagination,
        filters: view.filters().clone(),
    };
    Ok(Json(ApiResponse::success(Some(dto), None, Some(Meta { total }))))
}

/// Get a single complaint
#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    tag = "complaints",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint detail", body = ApiResponse<ComplaintResponseDto>),
        (status = 403, description = "Complaint belongs to another user"),
        (status = 404, description = "Complaint not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_complaint(
    session: Session,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>, AppError> {
    let complaint = service.get(&id).await?;

    if !session.is_admin() {
        if let (Some(owner), Some(caller)) = (complaint.user_id.as_deref(), session.user_id()) {
            if owner != caller {
                return Err(AppError::Forbidden(
                    "You can only view your own complaints".to_string(),
                ));
            }
        }
    }

    Ok(Json(ApiResponse::success(Some(complaint.into()), None, None)))
}

/// Submit a complaint
///
/// Accepts multipart/form-data with:
/// - `title`, `description` (required)
/// - `latitude`, `longitude`, or `geolocation` = `denied` | `unavailable`
/// - `image` (required), `audio` (optional)
#[utoipa::path(
    post,
    path = "/api/complaints",
    tag = "complaints",
    request_body(
        content = UploadComplaintDto,
        content_type = "multipart/form-data",
        description = "Complaint with evidence photo and optional voice note",
    ),
    responses(
        (status = 201, description = "Complaint accepted", body = ApiResponse<SubmissionReceiptDto>),
        (status = 400, description = "Missing field or invalid evidence"),
        (status = 413, description = "Evidence too large"),
        (status = 502, description = "Complaint service unavailable")
    )
)]
pub async fn submit_complaint(
    MaybeSession(session): MaybeSession,
    State(service): State<Arc<ComplaintService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionReceiptDto>>), AppError> {
    let mut draft = ComplaintDraft {
        user_id: session
            .as_ref()
            .and_then(|s| s.user_id())
            .map(str::to_string),
        ..Default::default()
    };
    let mut latitude: Option<f64> = None;
    let mut longitude: Option<f64> = None;
    let mut geolocation: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" | "audio" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| field_name.clone());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read {} bytes: {}", field_name, e);
                    AppError::BadRequest(format!("Failed to read {} data: {}", field_name, e))
                })?;

                if data.len() > MAX_ATTACHMENT_SIZE {
                    return Err(AppError::Validation(format!(
                        "{} too large. Maximum size is {} MB",
                        field_name,
                        MAX_ATTACHMENT_SIZE / 1024 / 1024
                    )));
                }
                if data.is_empty() {
                    continue;
                }

                let attachment = Attachment::new(file_name, content_type, data.to_vec());
                if field_name == "image" {
                    draft.image = Some(attachment);
                } else {
                    draft.audio = Some(attachment);
                }
            }
            "title" | "description" | "latitude" | "longitude" | "geolocation" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
                })?;
                match field_name.as_str() {
                    "title" => draft.title = text,
                    "description" => draft.description = text,
                    "latitude" => latitude = Some(parse_coordinate("latitude", &text)?),
                    "longitude" => longitude = Some(parse_coordinate("longitude", &text)?),
                    _ => geolocation = Some(text.trim().to_lowercase()),
                }
            }
            _ => {
                debug!("Ignoring unknown multipart field: {}", field_name);
            }
        }
    }

    let fix = match (latitude, longitude, geolocation.as_deref()) {
        (Some(lat), Some(lng), _) => Some(LocationFix::Detected(GeoPoint::new(lat, lng))),
        (_, _, Some("denied")) => Some(LocationFix::PermissionDenied),
        (_, _, Some("unavailable")) => Some(LocationFix::Unavailable),
        _ => None,
    };
    if let Some(fix) = fix {
        draft.apply_location(fix);
    }

    let receipt = service.submit(&mut draft).await?;
    let message = receipt.message.clone();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(receipt), Some(message), None)),
    ))
}

fn parse_coordinate(name: &str, raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::Validation(format!("Invalid {}: {:?}", name, raw)))
}

/// Request a status change (admin)
#[utoipa::path(
    patch,
    path = "/api/complaints/{id}/status",
    tag = "complaints",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Updated complaint", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Validation error or transition refused"),
        (status = 403, description = "Admin access required"),
        (status = 502, description = "Complaint service unavailable")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_status(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let complaint = service
        .update_status(&id, dto.status, session.actor(), dto.comment.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(
        Some(complaint.into()),
        Some(format!("Status updated to {}", dto.status)),
        None,
    )))
}

/// Mark a complaint resolved (admin)
#[utoipa::path(
    post,
    path = "/api/complaints/{id}/resolve",
    tag = "complaints",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body(content = Option<ResolveComplaintDto>, description = "Optional comment"),
    responses(
        (status = 200, description = "Resolved complaint", body = ApiResponse<ComplaintResponseDto>),
        (status = 403, description = "Admin access required"),
        (status = 502, description = "Complaint service unavailable")
    ),
    security(("session_cookie" = []))
)]
pub async fn resolve_complaint(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<String>,
    dto: Option<AppJson<ResolveComplaintDto>>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>, AppError> {
    let dto = dto.map(|AppJson(dto)| dto).unwrap_or_default();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let complaint = service
        .resolve(&id, session.actor(), dto.comment.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(
        Some(complaint.into()),
        Some("Complaint resolved".to_string()),
        None,
    )))
}
