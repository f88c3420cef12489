use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::departments::models::Department;
use crate::shared::serde_ext::{label, optional_id, optional_label, optional_timestamp};

/// Complaint lifecycle state. Owned by the backend; the portal only requests
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum ComplaintStatus {
    #[default]
    #[serde(alias = "open", alias = "OPEN", alias = "New", alias = "new")]
    Open,
    #[serde(
        alias = "In Progress",
        alias = "in progress",
        alias = "in_progress",
        alias = "inprogress",
        alias = "IN_PROGRESS"
    )]
    InProgress,
    #[serde(alias = "resolved", alias = "RESOLVED")]
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [
        ComplaintStatus::Open,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Open => "Open",
            ComplaintStatus::InProgress => "InProgress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }

    /// Parse any of the spellings the backend uses ("In Progress",
    /// "in_progress", "resolved", ...)
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "open" | "new" => Some(ComplaintStatus::Open),
            "inprogress" => Some(ComplaintStatus::InProgress),
            "resolved" => Some(ComplaintStatus::Resolved),
            _ => None,
        }
    }

    /// Like [`Self::from_label`], also mapping the legacy `pending` and
    /// `completed` labels onto in-progress and resolved
    pub fn from_backend_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ComplaintStatus::InProgress),
            "completed" => Some(ComplaintStatus::Resolved),
            other => Self::from_label(other),
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority assigned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Case-insensitive parse of a backend priority label
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "WireLocation")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Location shapes the backend sends: GeoJSON point (`[lng, lat]`) or a plain pair
#[derive(Deserialize)]
#[serde(untagged)]
enum WireLocation {
    GeoJson { coordinates: Vec<f64> },
    Pair { latitude: f64, longitude: f64 },
    Short { lat: f64, lng: f64 },
}

impl TryFrom<WireLocation> for GeoPoint {
    type Error = String;

    fn try_from(wire: WireLocation) -> Result<Self, Self::Error> {
        match wire {
            WireLocation::GeoJson { coordinates } => match coordinates.as_slice() {
                [lng, lat, ..] => Ok(GeoPoint::new(*lat, *lng)),
                _ => Err(format!(
                    "GeoJSON point needs two coordinates, got {}",
                    coordinates.len()
                )),
            },
            WireLocation::Pair {
                latitude,
                longitude,
            } => Ok(GeoPoint::new(latitude, longitude)),
            WireLocation::Short { lat, lng } => Ok(GeoPoint::new(lat, lng)),
        }
    }
}

/// One entry of the append-only status trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusHistoryEntry {
    pub status: String,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Complaint as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Complaint {
    #[serde(alias = "_id", alias = "complaint_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Priority as the backend spells it; see [`Complaint::priority_kind`]
    #[serde(default, deserialize_with = "optional_label")]
    pub priority: Option<String>,
    /// Status as the backend spells it ("In Progress", "pending", "rejected", ...)
    #[serde(default, deserialize_with = "label")]
    pub status: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "department")]
    pub assigned_department: Option<String>,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub verified_by_citizen: Option<bool>,
    #[serde(default)]
    pub is_duplicate: Option<bool>,
    #[serde(default)]
    pub related_complaints: Vec<String>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Complaint {
    /// Assigned department, when it is one of the known departments
    pub fn department(&self) -> Option<Department> {
        self.assigned_department
            .as_deref()
            .and_then(Department::from_label)
    }

    pub fn priority_label(&self) -> &str {
        self.priority.as_deref().unwrap_or("")
    }

    /// One of the three known statuses, or `None` for labels such as
    /// `rejected` that the portal does not model
    pub fn status_kind(&self) -> Option<ComplaintStatus> {
        ComplaintStatus::from_backend_label(&self.status)
    }

    pub fn priority_kind(&self) -> Option<Priority> {
        self.priority.as_deref().and_then(Priority::from_label)
    }
}
