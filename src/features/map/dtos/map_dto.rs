use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::map::models::{Feature, FeatureCollection, FeatureProperties, PointGeometry};
use crate::shared::palette::{priority_label_badge, status_label_badge, Badge};

// ============================================================================
// Queries
// ============================================================================

/// `all` or empty means no filter and is not forwarded
fn active(filter: &Option<String>) -> Option<String> {
    filter
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case("all"))
        .map(str::to_string)
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct MapQuery {
    /// e.g. `sanitation`; `all` for every category
    pub category: Option<String>,
    /// e.g. `in_progress`; `all` for every status
    pub status: Option<String>,
}

impl MapQuery {
    pub fn backend_params(&self) -> Vec<(&'static str, String)> {
        [("category", &self.category), ("status", &self.status)]
            .into_iter()
            .filter_map(|(key, value)| active(value).map(|v| (key, v)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct HeatmapQuery {
    /// e.g. `traffic`; `all` for every category
    pub category: Option<String>,
}

impl HeatmapQuery {
    pub fn backend_params(&self) -> Vec<(&'static str, String)> {
        active(&self.category)
            .map(|c| vec![("category", c)])
            .unwrap_or_default()
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapPropertiesDto {
    #[serde(flatten)]
    pub properties: FeatureProperties,
    pub status_badge: Badge,
    pub priority_badge: Badge,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapFeatureDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: PointGeometry,
    pub properties: MapPropertiesDto,
}

impl From<Feature> for MapFeatureDto {
    fn from(feature: Feature) -> Self {
        let properties = feature.properties;
        Self {
            kind: feature.kind,
            geometry: feature.geometry,
            properties: MapPropertiesDto {
                status_badge: status_label_badge(properties.status.as_deref().unwrap_or_default()),
                priority_badge: priority_label_badge(
                    properties.priority.as_deref().unwrap_or_default(),
                ),
                properties,
            },
        }
    }
}

/// Feature collection with badges on every feature and its bounding box
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapFeatureCollectionDto {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[min_lng, min_lat, max_lng, max_lat]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    pub features: Vec<MapFeatureDto>,
}

impl From<FeatureCollection> for MapFeatureCollectionDto {
    fn from(collection: FeatureCollection) -> Self {
        Self {
            bbox: collection.bbox(),
            kind: collection.kind,
            features: collection
                .features
                .into_iter()
                .map(MapFeatureDto::from)
                .collect(),
        }
    }
}
