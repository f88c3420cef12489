use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::departments::models::Department;
use crate::shared::palette::{priority_label_badge, status_label_badge, Badge};
use crate::shared::serde_ext::optional_id;

// ============================================================================
// Stats
// ============================================================================

/// Backend stats for one department
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentStatsDto {
    pub department: String,
    #[serde(default)]
    pub total_complaints: i64,
    #[serde(default)]
    pub by_status: BTreeMap<String, i64>,
    #[serde(default)]
    pub by_priority: BTreeMap<String, i64>,
}

impl DepartmentStatsDto {
    /// First of `keys` present in `by_status`
    fn status_count(&self, keys: &[&str]) -> i64 {
        keys.iter()
            .find_map(|k| self.by_status.get(*k).copied())
            .unwrap_or(0)
    }

    pub fn resolved(&self) -> i64 {
        self.status_count(&["Resolved", "resolved"])
    }

    pub fn open(&self) -> i64 {
        self.status_count(&["Open", "open", "New", "new"])
    }
}

/// All departments that answered, plus portal-wide totals
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentsOverviewDto {
    pub departments: Vec<DepartmentStatsDto>,
    pub total_complaints: i64,
    pub total_open: i64,
    pub total_resolved: i64,
}

impl DepartmentsOverviewDto {
    pub fn from_stats(departments: Vec<DepartmentStatsDto>) -> Self {
        Self {
            total_complaints: departments.iter().map(|d| d.total_complaints).sum(),
            total_open: departments.iter().map(DepartmentStatsDto::open).sum(),
            total_resolved: departments.iter().map(DepartmentStatsDto::resolved).sum(),
            departments,
        }
    }
}

// ============================================================================
// Department complaints
// ============================================================================

/// Complaint row as listed under a department. Status and priority stay raw
/// strings here because department lists use legacy values ("pending",
/// "completed").
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentComplaintDto {
    #[serde(alias = "_id", alias = "complaint_id", deserialize_with = "required_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    optional_id(deserializer)?.ok_or_else(|| serde::de::Error::custom("missing complaint id"))
}

/// Department complaint list in any of the shapes the backend uses
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DepartmentComplaintsEnvelope {
    Wrapped {
        complaints: Vec<DepartmentComplaintDto>,
    },
    List(Vec<DepartmentComplaintDto>),
}

impl DepartmentComplaintsEnvelope {
    pub fn into_vec(self) -> Vec<DepartmentComplaintDto> {
        match self {
            DepartmentComplaintsEnvelope::Wrapped { complaints }
            | DepartmentComplaintsEnvelope::List(complaints) => complaints,
        }
    }
}

/// Row with display hints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentComplaintRowDto {
    #[serde(flatten)]
    pub complaint: DepartmentComplaintDto,
    pub status_badge: Badge,
    pub priority_badge: Badge,
}

impl From<DepartmentComplaintDto> for DepartmentComplaintRowDto {
    fn from(complaint: DepartmentComplaintDto) -> Self {
        Self {
            status_badge: status_label_badge(&complaint.status),
            priority_badge: priority_label_badge(&complaint.priority),
            complaint,
        }
    }
}

/// Status counts over every complaint of the department
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DepartmentCountsDto {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl DepartmentCountsDto {
    pub fn tally(complaints: &[DepartmentComplaintDto]) -> Self {
        let mut counts = Self {
            total: complaints.len(),
            ..Default::default()
        };
        for complaint in complaints {
            match complaint.status.trim().to_lowercase().as_str() {
                "open" | "new" => counts.open += 1,
                "in progress" | "inprogress" | "in_progress" | "pending" => {
                    counts.in_progress += 1
                }
                "resolved" | "completed" => counts.resolved += 1,
                _ => {}
            }
        }
        counts
    }
}

/// Filters for a department's complaint list. `all` or empty disables a filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct DepartmentComplaintsQuery {
    /// Substring of title or category
    pub search: Option<String>,
    /// Exact status, case-insensitive
    pub status: Option<String>,
    /// Exact priority, case-insensitive
    pub priority: Option<String>,
}

fn active(filter: &Option<String>) -> Option<String> {
    filter
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case("all"))
        .map(str::to_lowercase)
}

impl DepartmentComplaintsQuery {
    pub fn matches(&self, complaint: &DepartmentComplaintDto) -> bool {
        if let Some(search) = active(&self.search) {
            if !complaint.title.to_lowercase().contains(&search)
                && !complaint.category.to_lowercase().contains(&search)
            {
                return false;
            }
        }
        if let Some(status) = active(&self.status) {
            if complaint.status.to_lowercase() != status {
                return false;
            }
        }
        if let Some(priority) = active(&self.priority) {
            if complaint.priority.to_lowercase() != priority {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentComplaintsDto {
    pub department: Department,
    pub complaints: Vec<DepartmentComplaintRowDto>,
    pub counts: DepartmentCountsDto,
    pub filters: DepartmentComplaintsQuery,
}

// ============================================================================
// Reassignment
// ============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignDepartmentDto {
    /// Target department; label ("Water Department") or keyword ("water")
    #[serde(default)]
    pub department: Option<Department>,
}

/// Body sent to the backend's assign endpoint
#[derive(Debug, Clone, Serialize)]
pub struct BackendAssignment<'a> {
    pub department: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReassignmentDto {
    pub complaint_id: String,
    pub previous_department: Option<Department>,
    pub department: Department,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::complaints::models::{ComplaintStatus, Priority};
    use crate::shared::palette::{priority_badge, status_badge};

    fn row(title: &str, category: &str, status: &str, priority: &str) -> DepartmentComplaintDto {
        DepartmentComplaintDto {
            id: title.to_string(),
            title: title.to_string(),
            status: status.to_string(),
            category: category.to_string(),
            priority: priority.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_overview_totals() {
        let stats: Vec<DepartmentStatsDto> = serde_json::from_str(
            r#"[
                {"department": "Roads Department", "total_complaints": 10, "by_status": {"Open": 4, "Resolved": 6}},
                {"department": "Water Department", "total_complaints": 5, "by_status": {"new": 2, "resolved": 1}}
            ]"#,
        )
        .unwrap();

        let overview = DepartmentsOverviewDto::from_stats(stats);
        assert_eq!(overview.total_complaints, 15);
        assert_eq!(overview.total_open, 6);
        assert_eq!(overview.total_resolved, 7);
    }

    #[test]
    fn test_counts_use_legacy_labels() {
        let complaints = vec![
            row("a", "roads", "Open", "High"),
            row("b", "roads", "new", "Low"),
            row("c", "roads", "In Progress", "Low"),
            row("d", "roads", "pending", "Low"),
            row("e", "roads", "completed", "Low"),
            row("f", "roads", "rejected", "Low"),
        ];
        let counts = DepartmentCountsDto::tally(&complaints);
        assert_eq!(
            counts,
            DepartmentCountsDto {
                total: 6,
                open: 2,
                in_progress: 2,
                resolved: 1
            }
        );
    }

    #[test]
    fn test_search_matches_title_or_category() {
        let query = DepartmentComplaintsQuery {
            search: Some("ROAD".to_string()),
            status: Some("all".to_string()),
            priority: None,
        };
        assert!(query.matches(&row("Crater", "roads", "Open", "High")));
        assert!(query.matches(&row("Road sign down", "signage", "Open", "High")));
        assert!(!query.matches(&row("Leak", "water", "Open", "High")));
    }

    #[test]
    fn test_status_filter_is_exact() {
        let query = DepartmentComplaintsQuery {
            status: Some("open".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&row("a", "x", "Open", "Low")));
        assert!(!query.matches(&row("a", "x", "Reopened", "Low")));
    }

    #[test]
    fn test_row_badges_for_legacy_status() {
        let dto = DepartmentComplaintRowDto::from(row("a", "x", "completed", "medium"));
        assert_eq!(dto.status_badge, status_badge(ComplaintStatus::Resolved));
        assert_eq!(dto.priority_badge, priority_badge(Some(Priority::Medium)));
    }
}
