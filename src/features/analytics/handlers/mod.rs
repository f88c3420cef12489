pub mod analytics_handler;

pub use analytics_handler::{__path_get_dashboard_analytics, get_dashboard_analytics};
