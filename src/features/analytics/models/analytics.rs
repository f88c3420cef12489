use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregates the backend computes over the last `days_analyzed` days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardAnalytics {
    #[serde(default)]
    pub overview: AnalyticsOverview,
    #[serde(default)]
    pub by_category: BTreeMap<String, i64>,
    #[serde(default)]
    pub by_status: BTreeMap<String, i64>,
    #[serde(default)]
    pub by_priority: BTreeMap<String, i64>,
    #[serde(default)]
    pub resolution_metrics: ResolutionMetrics,
    #[serde(default)]
    pub top_locations: Vec<LocationCount>,
    #[serde(default)]
    pub daily_trends: Vec<DailyCount>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub total_complaints: i64,
    #[serde(default)]
    pub recent_complaints: i64,
    #[serde(default)]
    pub days_analyzed: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResolutionMetrics {
    /// Null when nothing has been resolved yet
    #[serde(default)]
    pub avg_resolution_time_hours: Option<f64>,
    #[serde(default)]
    pub total_resolved: i64,
    #[serde(default)]
    pub verification_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationCount {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyCount {
    pub date: String,
    #[serde(default)]
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_payload() {
        let analytics: DashboardAnalytics = serde_json::from_value(json!({
            "overview": {"total_complaints": 10, "recent_complaints": 4, "days_analyzed": 30},
            "by_category": {"roads": 6, "water": 4},
            "by_status": {"Open": 3, "In Progress": 2, "Resolved": 5},
            "by_priority": {"high": 1},
            "resolution_metrics": {
                "avg_resolution_time_hours": null,
                "total_resolved": 5,
                "verification_rate": 40.0
            },
            "top_locations": [{"address": "MG Road", "count": 4}],
            "daily_trends": [{"date": "2024-10-12", "count": 2}]
        }))
        .unwrap();

        assert_eq!(analytics.overview.total_complaints, 10);
        assert_eq!(analytics.by_status["In Progress"], 2);
        assert_eq!(analytics.resolution_metrics.avg_resolution_time_hours, None);
        assert_eq!(analytics.top_locations[0].address, "MG Road");
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let analytics: DashboardAnalytics = serde_json::from_value(json!({})).unwrap();
        assert_eq!(analytics, DashboardAnalytics::default());
    }
}
