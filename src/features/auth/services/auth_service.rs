use reqwest::multipart::Form;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    BackendLoginResponse, BackendRegisterResponse, LoginRequestDto, RegisterRequestDto,
};
use crate::features::auth::models::Session;
use crate::modules::backend::BackendClient;

const LOGIN_PATH: &str = "/api/complaints/login";
const REGISTER_PATH: &str = "/api/complaints/register";

/// Service for authentication operations (register, login).
///
/// Credentials are checked by the backend; the portal only turns a verified
/// login into a session.
pub struct AuthService {
    backend: Arc<BackendClient>,
    cookie_secure: bool,
}

impl AuthService {
    pub fn new(backend: Arc<BackendClient>, cookie_secure: bool) -> Self {
        Self {
            backend,
            cookie_secure,
        }
    }

    /// Whether session cookies carry the `Secure` attribute
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    /// Login with email, password and requested role
    pub async fn login(&self, dto: LoginRequestDto) -> Result<Session> {
        let form = Form::new()
            .text("email", dto.email.clone())
            .text("password", dto.password)
            .text("role", dto.role.as_str());

        let response: BackendLoginResponse =
            self.backend.post_multipart(LOGIN_PATH, form).await?;

        if response.verified == Some(false) {
            let reason = response
                .kind
                .unwrap_or_else(|| "Invalid credentials".to_string());
            tracing::warn!("Login refused for {}: {}", dto.email, reason);
            return Err(AppError::Unauthorized(reason));
        }

        tracing::info!("User {} logged in as {}", dto.email, dto.role.as_str());
        Ok(Session::new(response.userid, dto.email, dto.role))
    }

    /// Register a new account; returns the backend's confirmation message
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<String> {
        let form = Form::new()
            .text("name", dto.name)
            .text("email", dto.email.clone())
            .text("password", dto.password)
            .text("role", dto.role.as_str());

        let response: BackendRegisterResponse =
            self.backend.post_multipart(REGISTER_PATH, form).await?;

        if response.success == Some(false) {
            let reason = response
                .kind
                .or(response.message)
                .unwrap_or_else(|| "Registration failed".to_string());
            return Err(AppError::BadRequest(reason));
        }

        tracing::info!("Registered user {}", dto.email);
        Ok(response
            .message
            .unwrap_or_else(|| "Registration successful".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::models::Role;
    use crate::shared::test_helpers::backend_for;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn login_dto(role: Role) -> LoginRequestDto {
        LoginRequestDto {
            email: "citizen@example.com".to_string(),
            password: "secret".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_login_builds_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"verified": true, "userid": "u-9"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = AuthService::new(backend_for(&server), false);
        let session = service.login(login_dto(Role::Admin)).await.unwrap();
        assert_eq!(session.user_id(), Some("u-9"));
        assert_eq!(session.user.email, "citizen@example.com");
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn test_unverified_login_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"verified": false, "type": "User not found"})),
            )
            .mount(&server)
            .await;

        let service = AuthService::new(backend_for(&server), false);
        match service.login(login_dto(Role::User)).await {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "User not found"),
            other => panic!("expected unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_failure_is_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REGISTER_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "type": "Email already exists"})),
            )
            .mount(&server)
            .await;

        let service = AuthService::new(backend_for(&server), false);
        let dto = RegisterRequestDto {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "pw".to_string(),
            role: Role::User,
        };
        match service.register(dto).await {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Email already exists"),
            other => panic!("expected bad request, got {:?}", other),
        }
    }
}
