use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::config::BackendConfig;
use crate::core::error::{AppError, Result};

/// Error body shapes the backend uses (`detail` from FastAPI, `message`/`error` elsewhere)
#[derive(Debug, Deserialize)]
struct BackendErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client for the external complaint backend.
///
/// Endpoint paths live in the feature services; this type only knows how to
/// send a request and turn the answer into a typed value or an `AppError`.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Percent-encode a value for use as one path segment
    pub fn segment(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!("Backend GET {} {:?}", path, query);
        let request = self.request(Method::GET, path).query(query);
        self.execute(path, request).await
    }

    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!("Backend PATCH {}", path);
        let request = self.request(Method::PATCH, path).json(body);
        self.execute(path, request).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        tracing::debug!("Backend POST (multipart) {}", path);
        let request = self.request(Method::POST, path).multipart(form);
        self.execute(path, request).await
    }

    async fn execute<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Backend request to {} failed: {:?}", path, e);
            AppError::ExternalServiceError(format!("Complaint service unreachable: {}", e))
        })?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read backend response from {}: {:?}", path, e);
            AppError::ExternalServiceError(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        // Empty 2xx bodies decode as JSON null
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };

        serde_json::from_str(body).map_err(|e| {
            tracing::error!("Unexpected response shape from {}: {}", path, e);
            AppError::MalformedResponse(format!("{}: {}", path, e))
        })
    }
}

/// Best human-readable message from an error body
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = serde_json::from_str::<BackendErrorResponse>(trimmed) {
        let detail = parsed.detail.and_then(|d| match d {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        });
        if let Some(message) = detail.or(parsed.message).or(parsed.error) {
            return Some(message);
        }
    }

    Some(trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::backend_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(r#"{"detail": "Complaint not found"}"#).as_deref(),
            Some("Complaint not found")
        );
        assert_eq!(
            error_message(r#"{"message": "nope"}"#).as_deref(),
            Some("nope")
        );
        assert_eq!(error_message("plain text").as_deref(), Some("plain text"));
        assert_eq!(error_message("   "), None);
    }

    #[test]
    fn test_segment_encodes_spaces() {
        assert_eq!(BackendClient::segment("Roads Department"), "Roads%20Department");
    }

    #[tokio::test]
    async fn test_get_json_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/analytics/dashboard"))
            .and(query_param("days_back", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = backend_for(&server);
        let value: serde_json::Value = client
            .get_json("/api/analytics/dashboard", &[("days_back", "7".to_string())])
            .await
            .unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_non_success_maps_to_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/complaints/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Complaint not found"})),
            )
            .mount(&server)
            .await;

        let client = backend_for(&server);
        let err = client
            .get_json::<serde_json::Value>("/api/complaints/missing", &[])
            .await
            .unwrap_err();
        match err {
            AppError::Upstream { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Complaint not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_shape_maps_to_malformed() {
        #[derive(Debug, Deserialize)]
        struct Expected {
            #[allow(dead_code)]
            count: i64,
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["not", "an", "object"])))
            .mount(&server)
            .await;

        let client = backend_for(&server);
        let err = client.get_json::<Expected>("/shape", &[]).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_patch_json_with_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/complaints/c1/status"))
            .and(body_json(json!({"status": "Resolved"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = backend_for(&server);
        let value: serde_json::Value = client
            .patch_json("/api/complaints/c1/status", &json!({"status": "Resolved"}))
            .await
            .unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_unreachable_backend_maps_to_external_error() {
        // Reserve a free port, then release it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = BackendConfig {
            base_url: format!("http://{}", addr),
            timeout: std::time::Duration::from_secs(2),
            user_agent: "complaint-portal-tests".to_string(),
        };
        let client = BackendClient::new(&config).unwrap();

        let err = client
            .get_json::<serde_json::Value>("/api/complaints/all", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}
