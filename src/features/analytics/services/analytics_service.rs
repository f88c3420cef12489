use std::sync::Arc;

use crate::core::error::Result;
use crate::features::analytics::models::DashboardAnalytics;
use crate::modules::backend::BackendClient;
use crate::shared::constants::MAX_ANALYTICS_DAYS_BACK;

pub struct AnalyticsService {
    backend: Arc<BackendClient>,
}

impl AnalyticsService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    /// Dashboard aggregates over the last `days_back` days, clamped to 1..=365
    pub async fn dashboard(&self, days_back: u32) -> Result<DashboardAnalytics> {
        let days_back = days_back.clamp(1, MAX_ANALYTICS_DAYS_BACK);
        tracing::debug!("Fetching dashboard analytics for {} days", days_back);
        self.backend
            .get_json(
                "/api/analytics/dashboard",
                &[("days_back", days_back.to_string())],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::backend_for;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_days_back_is_clamped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/analytics/dashboard"))
            .and(query_param("days_back", "365"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "overview": {"total_complaints": 2, "recent_complaints": 1, "days_analyzed": 365}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = AnalyticsService::new(backend_for(&server));
        let analytics = service.dashboard(9000).await.unwrap();
        assert_eq!(analytics.overview.days_analyzed, 365);
    }

    #[tokio::test]
    async fn test_backend_failure_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/analytics/dashboard"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
            .mount(&server)
            .await;

        let service = AnalyticsService::new(backend_for(&server));
        match service.dashboard(7).await {
            Err(AppError::Upstream { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
