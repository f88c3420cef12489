mod geojson;

pub use geojson::{Feature, FeatureCollection, FeatureProperties, PointGeometry, PointKind};
