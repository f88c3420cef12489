use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{LoginRequestDto, RegisterRequestDto, SessionResponseDto};
use crate::features::auth::models::Session;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::AppendHeaders,
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<String>),
        (status = 400, description = "Validation error or registration refused"),
        (status = 502, description = "Complaint service unavailable")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<String>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(None, Some(message), None)),
    ))
}

/// Login and receive the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful, `token` cookie set", body = ApiResponse<SessionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Credentials refused by the complaint service"),
        (status = 502, description = "Complaint service unavailable")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(
    AppendHeaders<[(axum::http::HeaderName, String); 1]>,
    Json<ApiResponse<SessionResponseDto>>,
)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.login(dto).await?;
    let cookie = session.to_cookie(service.cookie_secure());

    Ok((
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(ApiResponse::success(Some(session.into()), None, None)),
    ))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
) -> (
    AppendHeaders<[(axum::http::HeaderName, String); 1]>,
    Json<ApiResponse<()>>,
) {
    let cookie = Session::removal_cookie(service.cookie_secure());
    (
        AppendHeaders([(SET_COOKIE, cookie.to_string())]),
        Json(ApiResponse::success(None, Some("Logged out".to_string()), None)),
    )
}

/// Get the current session
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current session", body = ApiResponse<SessionResponseDto>),
        (status = 401, description = "No valid session cookie")
    ),
    tag = "auth",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_me(session: Session) -> Result<Json<ApiResponse<SessionResponseDto>>> {
    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}
