use serde::Serialize;
use utoipa::ToSchema;

use crate::features::analytics::dtos::hotspots;
use crate::features::analytics::models::{DashboardAnalytics, LocationCount};
use crate::features::complaints::dtos::ComplaintResponseDto;
use crate::features::complaints::models::{Complaint, ComplaintStatus};
use crate::shared::constants::RECENT_COMPLAINTS_LIMIT;

/// Complaint half of the overview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplaintsOverviewDto {
    pub total: usize,
    /// Newest first
    pub recent: Vec<ComplaintResponseDto>,
    pub in_progress: usize,
    pub resolved: usize,
}

impl ComplaintsOverviewDto {
    pub fn from_complaints(mut complaints: Vec<Complaint>) -> Self {
        let count = |status: ComplaintStatus| {
            complaints
                .iter()
                .filter(|c| c.status_kind() == Some(status))
                .count()
        };
        let in_progress = count(ComplaintStatus::InProgress);
        let resolved = count(ComplaintStatus::Resolved);

        // Undated complaints sort last
        complaints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = complaints.len();
        let recent = complaints
            .iter()
            .take(RECENT_COMPLAINTS_LIMIT)
            .map(ComplaintResponseDto::from)
            .collect();

        Self {
            total,
            recent,
            in_progress,
            resolved,
        }
    }
}

/// Analytics half of the overview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeeklyAnalyticsDto {
    pub days_analyzed: i64,
    pub total_complaints: i64,
    pub recent_complaints: i64,
    pub top_location: Option<LocationCount>,
    pub category_count: usize,
    pub location_count: usize,
    pub hotspot_count: usize,
}

impl From<&DashboardAnalytics> for WeeklyAnalyticsDto {
    fn from(analytics: &DashboardAnalytics) -> Self {
        Self {
            days_analyzed: analytics.overview.days_analyzed,
            total_complaints: analytics.overview.total_complaints,
            recent_complaints: analytics.overview.recent_complaints,
            top_location: analytics
                .top_locations
                .iter()
                .max_by_key(|l| l.count)
                .cloned(),
            category_count: analytics.by_category.len(),
            location_count: analytics.top_locations.len(),
            hotspot_count: hotspots(&analytics.top_locations).len(),
        }
    }
}

/// Landing page numbers. Either half may be missing; `errors` says why.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardOverviewDto {
    pub complaints: Option<ComplaintsOverviewDto>,
    pub analytics: Option<WeeklyAnalyticsDto>,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::complaints::models::Priority;
    use crate::shared::test_helpers::sample_complaint;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_recent_are_newest_three() {
        let mut complaints: Vec<Complaint> = (1..=5)
            .map(|day| {
                let mut c = sample_complaint(
                    &format!("c{}", day),
                    "Pothole",
                    "roads",
                    Priority::Low,
                    ComplaintStatus::Open,
                );
                c.created_at = Utc.with_ymd_and_hms(2024, 10, day, 9, 0, 0).single();
                c
            })
            .collect();
        complaints[0].created_at = None;
        complaints[1].status = "Resolved".to_string();
        complaints[2].status = "pending".to_string();

        let overview = ComplaintsOverviewDto::from_complaints(complaints);
        let ids: Vec<_> = overview.recent.iter().map(|c| c.complaint.id.as_str()).collect();
        assert_eq!(ids, vec!["c5", "c4", "c3"]);
        assert_eq!(overview.total, 5);
        assert_eq!(overview.in_progress, 1);
        assert_eq!(overview.resolved, 1);
    }

    #[test]
    fn test_weekly_analytics_picks_busiest_location() {
        let analytics: DashboardAnalytics = serde_json::from_value(serde_json::json!({
            "by_category": {"roads": 1, "water": 2},
            "top_locations": [
                {"address": "Station Road", "count": 2},
                {"address": "MG Road", "count": 6}
            ]
        }))
        .unwrap();

        let weekly = WeeklyAnalyticsDto::from(&analytics);
        assert_eq!(weekly.top_location.map(|l| l.address), Some("MG Road".to_string()));
        assert_eq!(weekly.category_count, 2);
        assert_eq!(weekly.hotspot_count, 1);
    }
}
