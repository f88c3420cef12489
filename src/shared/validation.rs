use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::AppError;

lazy_static! {
    /// Regex for backend identifiers (complaint ids, user ids) before they are
    /// interpolated into backend URLs
    /// - Valid: "6710c2f0a1b2c3d4e5f60718", "user_42", "a-b-c"
    /// - Invalid: "", "../all", "id with space", "id?x=1"
    pub static ref IDENTIFIER_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Reject identifiers that could escape their path segment
pub fn ensure_identifier(kind: &str, value: &str) -> Result<(), AppError> {
    if IDENTIFIER_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Invalid {}: {:?}", kind, value)))
    }
}
