use std::sync::Arc;

use crate::core::error::Result;
use crate::features::map::dtos::{HeatmapQuery, MapFeatureCollectionDto, MapQuery};
use crate::features::map::models::FeatureCollection;
use crate::modules::backend::BackendClient;

pub struct MapService {
    backend: Arc<BackendClient>,
}

impl MapService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    /// Complaint markers, optionally filtered by category and status
    pub async fn complaints(&self, query: &MapQuery) -> Result<MapFeatureCollectionDto> {
        let collection: FeatureCollection = self
            .backend
            .get_json("/api/map/complaints", &query.backend_params())
            .await?;
        tracing::debug!("Map returned {} complaint features", collection.features.len());
        Ok(collection.into())
    }

    /// Heatmap points, optionally filtered by category
    pub async fn heatmap(&self, query: &HeatmapQuery) -> Result<MapFeatureCollectionDto> {
        let collection: FeatureCollection = self
            .backend
            .get_json("/api/map/heatmap", &query.backend_params())
            .await?;
        Ok(collection.into())
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
    async fn test_forwards_active_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/map/complaints"))
            .and(query_param("status", "resolved"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "FeatureCollection",
                "features": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = MapService::new(backend_for(&server));
        let query = MapQuery {
            category: Some("all".to_string()),
            status: Some("resolved".to_string()),
        };
        let dto = service.complaints(&query).await.unwrap();
        assert!(dto.features.is_empty());
        assert_eq!(dto.bbox, None);

        let requests = server.received_requests().await.unwrap_or_default();
        assert_eq!(requests[0].url.query(), Some("status=resolved"));
    }

    #[tokio::test]
    async fn test_non_geojson_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/map/heatmap"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": "nope"})))
            .mount(&server)
            .await;

        let service = MapService::new(backend_for(&server));
        let result = service.heatmap(&HeatmapQuery::default()).await;
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}
