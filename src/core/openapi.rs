use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::analytics::{
    dtos as analytics_dtos, handlers as analytics_handlers, models as analytics_models,
};
use crate::features::auth::{
    dtos as auth_dtos, handlers as auth_handlers, models as auth_models,
};
use crate::features::complaints::{
    dtos as complaints_dtos, handlers as complaints_handlers, models as complaints_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::departments::{
    dtos as departments_dtos, handlers as departments_handlers, models as departments_models,
};
use crate::features::map::{dtos as map_dtos, handlers as map_handlers, models as map_models};
use crate::shared::constants::SESSION_COOKIE_NAME;
use crate::shared::palette::{Badge, Tone};
use crate::shared::types::{Meta, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::logout,
        auth_handlers::get_me,
        // Complaints
        complaints_handlers::list_complaints,
        complaints_handlers::get_complaint,
        complaints_handlers::submit_complaint,
        complaints_handlers::update_status,
        complaints_handlers::resolve_complaint,
        // Departments
        departments_handlers::get_overview,
        departments_handlers::get_department_complaints,
        departments_handlers::get_department_stats,
        departments_handlers::assign_department,
        // Analytics
        analytics_handlers::get_dashboard_analytics,
        // Dashboard
        dashboard_handlers::get_overview,
        // Map
        map_handlers::get_map_complaints,
        map_handlers::get_heatmap,
    ),
    components(
        schemas(
            // Shared
            Meta,
            PaginationMeta,
            Badge,
            Tone,
            // Auth
            auth_models::Role,
            auth_models::SessionUser,
            auth_models::Session,
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::SessionResponseDto,
            // Complaints
            complaints_models::Complaint,
            complaints_models::ComplaintStatus,
            complaints_models::Priority,
            complaints_models::GeoPoint,
            complaints_models::StatusHistoryEntry,
            complaints_models::ComplaintFilters,
            complaints_dtos::ComplaintResponseDto,
            complaints_dtos::ComplaintPageDto,
            complaints_dtos::SubmissionReceiptDto,
            complaints_dtos::UpdateStatusDto,
            complaints_dtos::ResolveComplaintDto,
            complaints_dtos::UploadComplaintDto,
            // Departments
            departments_models::Department,
            departments_dtos::DepartmentStatsDto,
            departments_dtos::DepartmentsOverviewDto,
            departments_dtos::DepartmentComplaintDto,
            departments_dtos::DepartmentComplaintRowDto,
            departments_dtos::DepartmentCountsDto,
            departments_dtos::DepartmentComplaintsDto,
            departments_dtos::AssignDepartmentDto,
            departments_dtos::ReassignmentDto,
            // Analytics
            analytics_models::DashboardAnalytics,
            analytics_models::AnalyticsOverview,
            analytics_models::ResolutionMetrics,
            analytics_models::LocationCount,
            analytics_models::DailyCount,
            analytics_dtos::SeriesPoint,
            analytics_dtos::AnalyticsSummaryDto,
            analytics_dtos::TopLocationDto,
            analytics_dtos::AnalyticsViewDto,
            analytics_dtos::AnalyticsDashboardDto,
            // Dashboard
            dashboard_dtos::ComplaintsOverviewDto,
            dashboard_dtos::WeeklyAnalyticsDto,
            dashboard_dtos::DashboardOverviewDto,
            // Map
            map_models::PointGeometry,
            map_models::PointKind,
            map_models::FeatureProperties,
            map_dtos::MapPropertiesDto,
            map_dtos::MapFeatureDto,
            map_dtos::MapFeatureCollectionDto,
        )
    ),
    tags(
        (name = "auth", description = "Sign-up, sign-in and the session cookie"),
        (name = "complaints", description = "Filing and tracking complaints"),
        (name = "departments", description = "Department stats and reassignment (admin only)"),
        (name = "analytics", description = "Aggregated complaint analytics"),
        (name = "dashboard", description = "Landing page overview"),
        (name = "map", description = "Complaint markers and heatmap as GeoJSON"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Complaint Portal API",
        version = "0.1.0",
        description = "API documentation for the citizen complaint portal",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
