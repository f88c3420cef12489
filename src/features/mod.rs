pub mod analytics;
pub mod auth;
pub mod complaints;
pub mod dashboard;
pub mod departments;
pub mod map;
