mod analytics;

pub use analytics::{
    AnalyticsOverview, DailyCount, DashboardAnalytics, LocationCount, ResolutionMetrics,
};
