use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::complaints::models::{
    Complaint, ComplaintFilters, ComplaintListView, ComplaintStatus,
};
use crate::features::departments::models::Department;
use crate::shared::palette::{priority_label_badge, status_label_badge, Badge};
use crate::shared::types::PaginationMeta;

// ============================================================================
// Responses
// ============================================================================

/// Complaint with display hints for its status and priority
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplaintResponseDto {
    #[serde(flatten)]
    pub complaint: Complaint,
    /// Known department the complaint is assigned to, if any
    pub department: Option<Department>,
    pub status_badge: Badge,
    pub priority_badge: Badge,
}

impl From<Complaint> for ComplaintResponseDto {
    fn from(complaint: Complaint) -> Self {
        Self {
            department: complaint.department(),
            status_badge: status_label_badge(&complaint.status),
            priority_badge: priority_label_badge(complaint.priority_label()),
            complaint,
        }
    }
}

impl From<&Complaint> for ComplaintResponseDto {
    fn from(complaint: &Complaint) -> Self {
        complaint.clone().into()
    }
}

/// One page of a filtered complaint list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplaintPageDto {
    pub items: Vec<ComplaintResponseDto>,
    pub pagination: PaginationMeta,
    pub filters: ComplaintFilters,
}

/// What the backend said about an accepted submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionReceiptDto {
    /// Id of the created complaint, when the backend returns one
    pub complaint_id: Option<String>,
    pub message: String,
}

impl SubmissionReceiptDto {
    /// Read whatever the backend returned: a complaint, `{complaint_id}`,
    /// `{id}`, `{_id}` or just a message
    pub fn from_backend(value: &serde_json::Value) -> Self {
        let source = value.get("complaint").unwrap_or(value);
        let complaint_id = ["complaint_id", "_id", "id"]
            .iter()
            .find_map(|key| match source.get(*key) {
                Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(serde_json::Value::Number(n)) => Some(n.to_string()),
                _ => None,
            });
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Complaint submitted successfully!")
            .to_string();

        Self {
            complaint_id,
            message,
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Filters and page for the complaint list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ComplaintListQuery {
    /// Substring of the title
    pub title: Option<String>,
    /// Substring of the category
    pub category: Option<String>,
    /// Substring of the priority (Low, Medium, High)
    pub priority: Option<String>,
    /// Substring of the status (Open, InProgress, Resolved)
    pub status: Option<String>,
    /// Page number (1-indexed)
    #[param(minimum = 1)]
    pub page: Option<usize>,
}

impl ComplaintListQuery {
    pub fn into_view(self) -> ComplaintListView {
        let filters = ComplaintFilters {
            title: self.title.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
        };
        ComplaintListView::new(filters, self.page.unwrap_or(1))
    }
}

/// Request a status transition; the backend decides whether it is legal
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusDto {
    pub status: ComplaintStatus,

    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

/// Optional note attached when resolving
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ResolveComplaintDto {
    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: Option<String>,
}

/// Body sent to the backend's status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct BackendStatusUpdate<'a> {
    pub status: &'static str,
    pub updated_by: &'a str,
    pub comment: &'a str,
}

/// Multipart form accepted by `POST /api/complaints` (documentation only)
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadComplaintDto {
    pub title: String,
    pub description: String,
    /// Decimal degrees; omit together with `longitude` when `geolocation` is set
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `denied` or `unavailable` to use the fallback coordinate
    pub geolocation: Option<String>,
    /// Evidence photo (jpeg, png, webp; max 10MB)
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// Optional voice note (webm, mpeg, wav, ogg; max 10MB)
    #[schema(value_type = Option<String>, format = Binary)]
    pub audio: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::complaints::models::Priority;
    use crate::shared::palette::{Tone, UNKNOWN_BADGE};
    use crate::shared::test_helpers::sample_complaint;
    use serde_json::json;

    #[test]
    fn test_response_flattens_complaint_and_adds_badges() {
        let mut complaint =
            sample_complaint("c1", "Pothole", "roads", Priority::High, ComplaintStatus::Open);
        complaint.assigned_department = Some("Roads Department".to_string());

        let dto = ComplaintResponseDto::from(complaint);
        assert_eq!(dto.status_badge.tone, Tone::Danger);

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["id"], "c1");
        assert_eq!(value["department"], "Roads Department");
        assert_eq!(value["priority_badge"]["tone"], "danger");
    }

    #[test]
    fn test_response_for_unmodelled_status_uses_unknown_badge() {
        let mut complaint =
            sample_complaint("c2", "Leak", "water", Priority::Low, ComplaintStatus::Open);
        complaint.status = "rejected".to_string();
        complaint.priority = Some("urgent".to_string());

        let dto = ComplaintResponseDto::from(complaint);
        assert_eq!(dto.status_badge, UNKNOWN_BADGE);
        assert_eq!(dto.priority_badge, UNKNOWN_BADGE);

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["status"], "rejected");
    }

    #[test]
    fn test_receipt_reads_several_shapes() {
        let receipt = SubmissionReceiptDto::from_backend(&json!({"complaint_id": "abc", "message": "ok"}));
        assert_eq!(receipt.complaint_id.as_deref(), Some("abc"));
        assert_eq!(receipt.message, "ok");

        let receipt = SubmissionReceiptDto::from_backend(&json!({"complaint": {"_id": "x1"}}));
        assert_eq!(receipt.complaint_id.as_deref(), Some("x1"));

        let receipt = SubmissionReceiptDto::from_backend(&serde_json::Value::Null);
        assert!(receipt.complaint_id.is_none());
        assert_eq!(receipt.message, "Complaint submitted successfully!");
    }

    #[test]
    fn test_query_into_view() {
        let query = ComplaintListQuery {
            status: Some("open".to_string()),
            page: Some(0),
            ..Default::default()
        };
        let view = query.into_view();
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.filters().status, "open");
    }
}
