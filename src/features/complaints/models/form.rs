use crate::core::error::AppError;
use crate::features::complaints::models::GeoPoint;
use crate::shared::constants::{FALLBACK_LATITUDE, FALLBACK_LONGITUDE};

/// Message shown when a submission is missing a required field
pub const MISSING_FIELDS_MESSAGE: &str =
    "Please fill in all required fields and select a location.";

/// Maximum size of a single evidence file (10MB)
pub const MAX_ATTACHMENT_SIZE: usize = 10 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

pub const ALLOWED_AUDIO_TYPES: &[&str] = &[
    "audio/webm",
    "audio/mpeg",
    "audio/wav",
    "audio/x-wav",
    "audio/ogg",
];

/// Evidence file attached to a complaint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    fn ensure(&self, kind: &str, allowed: &[&str]) -> Result<(), AppError> {
        if self.bytes.is_empty() {
            return Err(AppError::Validation(format!("{} file is empty", kind)));
        }
        if self.bytes.len() > MAX_ATTACHMENT_SIZE {
            return Err(AppError::Validation(format!(
                "{} file too large. Maximum size is {} MB",
                kind,
                MAX_ATTACHMENT_SIZE / 1024 / 1024
            )));
        }
        // "audio/webm;codecs=opus" is still audio/webm
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        if !allowed.contains(&essence.as_str()) {
            return Err(AppError::Validation(format!(
                "{} type '{}' is not allowed. Allowed types: {}",
                kind,
                self.content_type,
                allowed.join(", ")
            )));
        }
        Ok(())
    }

    pub fn ensure_image(&self) -> Result<(), AppError> {
        self.ensure("Image", ALLOWED_IMAGE_TYPES)
    }

    pub fn ensure_audio(&self) -> Result<(), AppError> {
        self.ensure("Audio", ALLOWED_AUDIO_TYPES)
    }
}

/// Outcome of asking for the reporter's position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationFix {
    /// Position reported by the device
    Detected(GeoPoint),
    /// Point picked on the map
    MapClick(GeoPoint),
    /// The reporter refused the location permission
    PermissionDenied,
    /// The device has no geolocation support
    Unavailable,
}

impl LocationFix {
    pub fn resolve(self) -> GeoPoint {
        match self {
            LocationFix::Detected(point) | LocationFix::MapClick(point) => point,
            LocationFix::PermissionDenied | LocationFix::Unavailable => {
                GeoPoint::new(FALLBACK_LATITUDE, FALLBACK_LONGITUDE)
            }
        }
    }
}

/// Complaint being composed by a reporter.
///
/// Survives a failed submission untouched so it can be retried; cleared after
/// the backend accepts it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintDraft {
    pub title: String,
    pub description: String,
    pub location: Option<GeoPoint>,
    pub image: Option<Attachment>,
    pub audio: Option<Attachment>,
    pub user_id: Option<String>,
}

/// A draft that passed validation, ready to post
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintSubmission {
    pub title: String,
    pub description: String,
    pub location: GeoPoint,
    pub image: Attachment,
    pub audio: Option<Attachment>,
    pub user_id: Option<String>,
}

impl ComplaintDraft {
    pub fn apply_location(&mut self, fix: LocationFix) {
        self.location = Some(fix.resolve());
    }

    pub fn is_empty(&self) -> bool {
        self == &ComplaintDraft::default()
    }

    /// Check required fields. Fails before any network activity.
    pub fn validate(&self) -> Result<ComplaintSubmission, AppError> {
        let title = self.title.trim();
        let description = self.description.trim();

        let (location, image) = match (&self.location, &self.image) {
            (Some(location), Some(image)) if !title.is_empty() && !description.is_empty() => {
                (*location, image)
            }
            _ => return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
        };

        if !location.is_valid() {
            return Err(AppError::Validation(format!(
                "Location out of range: {}, {}",
                location.latitude, location.longitude
            )));
        }

        image.ensure_image()?;
        if let Some(audio) = &self.audio {
            audio.ensure_audio()?;
        }

        Ok(ComplaintSubmission {
            title: title.to_string(),
            description: description.to_string(),
            location,
            image: image.clone(),
            audio: self.audio.clone(),
            user_id: self.user_id.clone().filter(|id| !id.is_empty()),
        })
    }

    pub fn reset(&mut self) {
        *self = ComplaintDraft::default();
    }
}
