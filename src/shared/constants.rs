/// Complaints shown per page in list views
pub const COMPLAINT_PAGE_SIZE: usize = 5;

/// Recent complaints shown on the dashboard overview
pub const RECENT_COMPLAINTS_LIMIT: usize = 3;

/// A top location with more complaints than this is a hotspot
pub const HOTSPOT_MIN_COUNT: i64 = 3;

/// Default analytics window for the analytics dashboard
pub const DEFAULT_ANALYTICS_DAYS_BACK: u32 = 30;

/// Analytics window used by the dashboard overview ("this week")
pub const OVERVIEW_DAYS_BACK: u32 = 7;

/// Largest analytics window accepted from callers
pub const MAX_ANALYTICS_DAYS_BACK: u32 = 365;

// =============================================================================
// SESSION
// =============================================================================

/// Name of the cookie holding the JSON-serialized session
pub const SESSION_COOKIE_NAME: &str = "token";

/// Session cookie lifetime
pub const SESSION_COOKIE_MAX_AGE_DAYS: i64 = 1;

/// Administrator role - can view all complaints, reassign and resolve them
pub const ROLE_ADMIN: &str = "admin";

/// Citizen role - can submit complaints and track their own
pub const ROLE_USER: &str = "user";

// =============================================================================
// GEOLOCATION
// =============================================================================

/// Coordinate used when the reporter's location cannot be detected
pub const FALLBACK_LATITUDE: f64 = 19.0760;
pub const FALLBACK_LONGITUDE: f64 = 72.8777;
