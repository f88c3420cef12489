use std::sync::Arc;

use crate::features::analytics::services::AnalyticsService;
use crate::features::complaints::services::ComplaintService;
use crate::features::dashboard::dtos::*;
use crate::shared::constants::OVERVIEW_DAYS_BACK;

/// Combines the complaint list and this week's analytics for the landing page
pub struct DashboardService {
    complaints: Arc<ComplaintService>,
    analytics: Arc<AnalyticsService>,
}

impl DashboardService {
    pub fn new(complaints: Arc<ComplaintService>, analytics: Arc<AnalyticsService>) -> Self {
        Self {
            complaints,
            analytics,
        }
    }

    /// Fetches both halves concurrently. A failing half is reported in
    /// `errors` and left empty; the other half is still returned.
    pub async fn overview(&self) -> DashboardOverviewDto {
        let (complaints, analytics) = tokio::join!(
            self.complaints.list_all(),
            self.analytics.dashboard(OVERVIEW_DAYS_BACK)
        );

        let mut errors = Vec::new();

        let complaints = match complaints {
            Ok(list) => Some(ComplaintsOverviewDto::from_complaints(list)),
            Err(e) => {
                tracing::warn!("Dashboard complaints unavailable: {}", e);
                errors.push(format!("Complaints unavailable: {}", e));
                None
            }
        };

        let analytics = match analytics {
            Ok(analytics) => Some(WeeklyAnalyticsDto::from(&analytics)),
            Err(e) => {
                tracing::warn!("Dashboard analytics unavailable: {}", e);
                errors.push(format!("Analytics unavailable: {}", e));
                None
            }
        };

        DashboardOverviewDto {
            complaints,
            analytics,
            errors,
        }
    }
}
