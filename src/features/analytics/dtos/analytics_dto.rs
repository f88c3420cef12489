use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::analytics::models::{DailyCount, DashboardAnalytics, LocationCount};
use crate::features::complaints::models::ComplaintStatus;
use crate::shared::constants::{DEFAULT_ANALYTICS_DAYS_BACK, HOTSPOT_MIN_COUNT};

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams, ToSchema)]
pub struct AnalyticsQuery {
    /// Days to analyze, 1..=365 (default 30)
    pub days_back: Option<u32>,
}

impl AnalyticsQuery {
    pub fn days_back(&self) -> u32 {
        self.days_back.unwrap_or(DEFAULT_ANALYTICS_DAYS_BACK)
    }
}

/// One bar or slice of a chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SeriesPoint {
    pub name: String,
    pub value: i64,
}

/// Headline numbers of the analytics dashboard
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnalyticsSummaryDto {
    pub total_complaints: i64,
    pub recent_complaints: i64,
    pub days_analyzed: i64,
    /// Share of complaints filed in the window, whole percent
    pub recent_growth: i64,
    /// Resolved share of all status counts, one decimal
    pub resolution_rate: f64,
    pub total_resolved: i64,
    /// e.g. "12.5h", or "N/A" when nothing was resolved
    pub avg_resolution_time: String,
    pub verification_rate: f64,
    pub hotspot_count: usize,
}

/// Top location with its share of the busiest one
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopLocationDto {
    pub address: String,
    pub count: i64,
    /// Percent of the busiest location's count, whole number
    pub percentage: i64,
}

/// Chart-ready form of [`DashboardAnalytics`]
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnalyticsViewDto {
    pub summary: AnalyticsSummaryDto,
    pub by_category: Vec<SeriesPoint>,
    pub by_status: Vec<SeriesPoint>,
    pub by_priority: Vec<SeriesPoint>,
    pub top_locations: Vec<TopLocationDto>,
    pub hotspots: Vec<LocationCount>,
    pub daily_trends: Vec<DailyCount>,
}

/// Backend aggregates plus their chart-ready form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyticsDashboardDto {
    pub days_back: u32,
    pub analytics: DashboardAnalytics,
    pub view: AnalyticsViewDto,
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn series(counts: &BTreeMap<String, i64>, capitalized: bool) -> Vec<SeriesPoint> {
    counts
        .iter()
        .map(|(name, value)| SeriesPoint {
            name: if capitalized {
                capitalize(name)
            } else {
                name.clone()
            },
            value: *value,
        })
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Resolved / sum of all status counts, in percent with one decimal
pub fn resolution_rate(by_status: &BTreeMap<String, i64>) -> f64 {
    let total: i64 = by_status.values().sum();
    if total <= 0 {
        return 0.0;
    }
    let resolved: i64 = by_status
        .iter()
        .filter(|(label, _)| ComplaintStatus::from_label(label) == Some(ComplaintStatus::Resolved))
        .map(|(_, count)| count)
        .sum();
    round_to(resolved as f64 / total as f64 * 100.0, 1)
}

pub fn recent_growth(recent: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (recent as f64 / total as f64 * 100.0).round() as i64
}

pub fn format_resolution_time(hours: Option<f64>) -> String {
    match hours {
        Some(h) if h.is_finite() => format!("{:.1}h", h),
        _ => "N/A".to_string(),
    }
}

pub fn hotspots(locations: &[LocationCount]) -> Vec<LocationCount> {
    locations
        .iter()
        .filter(|l| l.count > HOTSPOT_MIN_COUNT)
        .cloned()
        .collect()
}

fn top_locations(locations: &[LocationCount]) -> Vec<TopLocationDto> {
    let max = locations.iter().map(|l| l.count).max().unwrap_or(0);
    locations
        .iter()
        .map(|l| TopLocationDto {
            address: l.address.clone(),
            count: l.count,
            percentage: if max <= 0 {
                0
            } else {
                (l.count as f64 / max as f64 * 100.0).round() as i64
            },
        })
        .collect()
}

impl From<&DashboardAnalytics> for AnalyticsViewDto {
    fn from(analytics: &DashboardAnalytics) -> Self {
        let overview = analytics.overview;
        let metrics = analytics.resolution_metrics;
        let hotspots = hotspots(&analytics.top_locations);

        Self {
            summary: AnalyticsSummaryDto {
                total_complaints: overview.total_complaints,
                recent_complaints: overview.recent_complaints,
                days_analyzed: overview.days_analyzed,
                recent_growth: recent_growth(
                    overview.recent_complaints,
                    overview.total_complaints,
                ),
                resolution_rate: resolution_rate(&analytics.by_status),
                total_resolved: metrics.total_resolved,
                avg_resolution_time: format_resolution_time(metrics.avg_resolution_time_hours),
                verification_rate: metrics.verification_rate,
                hotspot_count: hotspots.len(),
            },
            by_category: series(&analytics.by_category, true),
            by_status: series(&analytics.by_status, false),
            by_priority: series(&analytics.by_priority, true),
            top_locations: top_locations(&analytics.top_locations),
            hotspots,
            daily_trends: analytics.daily_trends.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn location(address: &str, count: i64) -> LocationCount {
        LocationCount {
            address: address.to_string(),
            count,
        }
    }

    #[test]
    fn test_resolution_rate() {
        let by_status = counts(&[("Open", 3), ("InProgress", 2), ("Resolved", 5)]);
        assert_eq!(resolution_rate(&by_status), 50.0);
        assert_eq!(resolution_rate(&counts(&[("resolved", 1), ("open", 2)])), 33.3);
        assert_eq!(resolution_rate(&BTreeMap::new()), 0.0);
    }

    #[test]
    fn test_recent_growth_rounds_to_whole_percent() {
        assert_eq!(recent_growth(1, 3), 33);
        assert_eq!(recent_growth(2, 3), 67);
        assert_eq!(recent_growth(5, 0), 0);
    }

    #[test]
    fn test_resolution_time_label() {
        assert_eq!(format_resolution_time(Some(12.46)), "12.5h");
        assert_eq!(format_resolution_time(None), "N/A");
    }

    #[test]
    fn test_hotspots_need_more_than_three() {
        let locations = vec![location("A", 5), location("B", 3), location("C", 4)];
        let hot: Vec<_> = hotspots(&locations).into_iter().map(|l| l.address).collect();
        assert_eq!(hot, vec!["A", "C"]);
    }

    #[test]
    fn test_view_capitalizes_category_and_priority() {
        let analytics = DashboardAnalytics {
            by_category: counts(&[("roads", 2)]),
            by_status: counts(&[("In Progress", 2)]),
            by_priority: counts(&[("high", 1)]),
            top_locations: vec![location("A", 4), location("B", 1)],
            ..Default::default()
        };
        let view = AnalyticsViewDto::from(&analytics);

        assert_eq!(view.by_category[0].name, "Roads");
        assert_eq!(view.by_status[0].name, "In Progress");
        assert_eq!(view.by_priority[0].name, "High");
        assert_eq!(view.top_locations[1].percentage, 25);
        assert_eq!(view.summary.hotspot_count, 1);
        assert_eq!(view.summary.avg_resolution_time, "N/A");
    }
}
