//! Role-based authorization guards.
//!
//! The session is loaded by `session_middleware`; these guards read it from
//! the request extensions and check the role.
//!
//! Roles:
//! - admin: sees every complaint, reassigns and resolves them
//! - user: submits complaints and tracks their own

use crate::core::error::AppError;
use crate::features::auth::models::Session;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only handlers.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(session): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub Session);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !session.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(session.clone()))
    }
}
