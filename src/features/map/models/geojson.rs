//! GeoJSON point collections served by the backend's map endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

fn feature_collection() -> String {
    "FeatureCollection".to_string()
}

fn feature() -> String {
    "Feature".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Feature {
    #[serde(rename = "type", default = "feature")]
    pub kind: String,
    pub geometry: PointGeometry,
    #[serde(default)]
    pub properties: FeatureProperties,
}

/// A `Point`; coordinates are `[longitude, latitude]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PointGeometry {
    #[serde(rename = "type", default)]
    pub kind: PointKind,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PointKind {
    #[default]
    Point,
}

impl PointGeometry {
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Known complaint fields; anything else the backend adds (heatmap weights,
/// addresses) is kept in `extra`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeatureProperties {
    #[serde(default, alias = "_id", alias = "id")]
    pub complaint_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

impl FeatureCollection {
    /// `[min_lng, min_lat, max_lng, max_lat]`, or `None` when empty
    pub fn bbox(&self) -> Option<[f64; 4]> {
        let mut points = self.features.iter().map(|f| f.geometry);
        let first = points.next()?;
        let init = [
            first.longitude(),
            first.latitude(),
            first.longitude(),
            first.latitude(),
        ];
        Some(points.fold(init, |[w, s, e, n], p| {
            [
                w.min(p.longitude()),
                s.min(p.latitude()),
                e.max(p.longitude()),
                n.max(p.latitude()),
            ]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_keeps_unknown_properties() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [72.88, 19.07]},
                "properties": {"complaint_id": "c1", "status": "pending", "weight": 0.8}
            }]
        }))
        .unwrap();

        let feature = &collection.features[0];
        assert_eq!(feature.geometry.latitude(), 19.07);
        assert_eq!(feature.properties.complaint_id.as_deref(), Some("c1"));
        assert_eq!(feature.properties.extra["weight"], json!(0.8));
    }

    #[test]
    fn test_rejects_non_point_geometry() {
        let result: Result<FeatureCollection, _> = serde_json::from_value(json!({
            "features": [{
                "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0]]]},
                "properties": {}
            }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_bbox() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "features": [
                {"geometry": {"coordinates": [72.8, 19.0]}},
                {"geometry": {"coordinates": [73.1, 18.5]}}
            ]
        }))
        .unwrap();
        assert_eq!(collection.bbox(), Some([72.8, 18.5, 73.1, 19.0]));
        assert_eq!(FeatureCollection {
            kind: feature_collection(),
            features: Vec::new()
        }
        .bbox(), None);
    }
}
