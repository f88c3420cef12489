//! Badge colours for statuses and priorities.
//!
//! One table keyed by the enums so every response renders the same tone for
//! the same value.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::complaints::models::{ComplaintStatus, Priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Danger,
    Warning,
    Success,
    Info,
    Neutral,
}

/// Display hint attached to a status or priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Badge {
    pub tone: Tone,
    /// Hex colour, e.g. "#ef4444"
    pub color: &'static str,
}

const STATUS_BADGES: [(ComplaintStatus, Badge); 3] = [
    (
        ComplaintStatus::Open,
        Badge {
            tone: Tone::Danger,
            color: "#ef4444",
        },
    ),
    (
        ComplaintStatus::InProgress,
        Badge {
            tone: Tone::Warning,
            color: "#f59e0b",
        },
    ),
    (
        ComplaintStatus::Resolved,
        Badge {
            tone: Tone::Success,
            color: "#10b981",
        },
    ),
];

const PRIORITY_BADGES: [(Priority, Badge); 3] = [
    (
        Priority::Low,
        Badge {
            tone: Tone::Info,
            color: "#3b82f6",
        },
    ),
    (
        Priority::Medium,
        Badge {
            tone: Tone::Warning,
            color: "#f97316",
        },
    ),
    (
        Priority::High,
        Badge {
            tone: Tone::Danger,
            color: "#ef4444",
        },
    ),
];

/// Badge for values the backend did not send
pub const UNKNOWN_BADGE: Badge = Badge {
    tone: Tone::Neutral,
    color: "#64748b",
};

pub fn status_badge(status: ComplaintStatus) -> Badge {
    STATUS_BADGES
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, badge)| *badge)
        .unwrap_or(UNKNOWN_BADGE)
}

pub fn priority_badge(priority: Option<Priority>) -> Badge {
    priority
        .and_then(|p| PRIORITY_BADGES.iter().find(|(q, _)| *q == p))
        .map(|(_, badge)| *badge)
        .unwrap_or(UNKNOWN_BADGE)
}

/// Badge for a raw backend status label. Legacy `pending` and `completed`
/// colour like in-progress and resolved.
pub fn status_label_badge(label: &str) -> Badge {
    ComplaintStatus::from_backend_label(label)
        .map(status_badge)
        .unwrap_or(UNKNOWN_BADGE)
}

/// Badge for a raw backend priority label
pub fn priority_label_badge(label: &str) -> Badge {
    priority_badge(Priority::from_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_a_badge() {
        assert_eq!(status_badge(ComplaintStatus::Open).tone, Tone::Danger);
        assert_eq!(status_badge(ComplaintStatus::InProgress).tone, Tone::Warning);
        assert_eq!(status_badge(ComplaintStatus::Resolved).tone, Tone::Success);
    }

    #[test]
    fn test_missing_priority_is_neutral() {
        assert_eq!(priority_badge(None), UNKNOWN_BADGE);
        assert_eq!(priority_badge(Some(Priority::High)).color, "#ef4444");
    }

    #[test]
    fn test_raw_labels() {
        assert_eq!(status_label_badge("pending").tone, Tone::Warning);
        assert_eq!(status_label_badge("Completed").tone, Tone::Success);
        assert_eq!(status_label_badge("in_progress").tone, Tone::Warning);
        assert_eq!(status_label_badge("rejected"), UNKNOWN_BADGE);
        assert_eq!(priority_label_badge("HIGH").tone, Tone::Danger);
        assert_eq!(priority_label_badge(""), UNKNOWN_BADGE);
    }
}
