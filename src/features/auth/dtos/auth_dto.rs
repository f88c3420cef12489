use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::models::{Role, Session};
use crate::shared::serde_ext::optional_id;

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    pub role: Role,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    pub role: Role,
}

/// Backend answer to `POST /api/complaints/login`
#[derive(Debug, Deserialize)]
pub struct BackendLoginResponse {
    #[serde(default)]
    pub verified: Option<bool>,
    /// Failure reason when `verified` is false
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, alias = "user_id", deserialize_with = "optional_id")]
    pub userid: Option<String>,
}

/// Backend answer to `POST /api/complaints/register`
#[derive(Debug, Deserialize)]
pub struct BackendRegisterResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response DTO for login and `/me`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponseDto {
    pub session: Session,
    pub is_admin: bool,
}

impl From<Session> for SessionResponseDto {
    fn from(session: Session) -> Self {
        Self {
            is_admin: session.is_admin(),
            session,
        }
    }
}
