use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Administrative unit a complaint can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Department {
    #[serde(rename = "Roads Department", alias = "roads")]
    Roads,
    #[serde(rename = "Sanitation Department", alias = "sanitation")]
    Sanitation,
    #[serde(rename = "Electricity Department", alias = "electricity")]
    Electricity,
    #[serde(rename = "Water Department", alias = "water")]
    Water,
    #[serde(rename = "Other", alias = "other")]
    Other,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Roads,
        Department::Sanitation,
        Department::Electricity,
        Department::Water,
        Department::Other,
    ];

    /// Label used by the backend, e.g. "Roads Department"
    pub fn label(&self) -> &'static str {
        match self {
            Department::Roads => "Roads Department",
            Department::Sanitation => "Sanitation Department",
            Department::Electricity => "Electricity Department",
            Department::Water => "Water Department",
            Department::Other => "Other",
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            Department::Roads => "roads",
            Department::Sanitation => "sanitation",
            Department::Electricity => "electricity",
            Department::Water => "water",
            Department::Other => "other",
        }
    }

    /// Accepts the full label, the keyword or a slug, ignoring case and
    /// punctuation ("Roads Department", "roads", "roads-department")
    pub fn from_label(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if normalized.is_empty() {
            return None;
        }
        Department::ALL.into_iter().find(|d| {
            let keyword = d.keyword();
            normalized == keyword || normalized == format!("{}department", keyword)
        })
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_variants() {
        assert_eq!(Department::from_label("Roads Department"), Some(Department::Roads));
        assert_eq!(Department::from_label("water"), Some(Department::Water));
        assert_eq!(
            Department::from_label("electricity-department"),
            Some(Department::Electricity)
        );
        assert_eq!(Department::from_label("Other"), Some(Department::Other));
        assert_eq!(Department::from_label("Parks Department"), None);
        assert_eq!(Department::from_label(""), None);
    }

    #[test]
    fn test_serde_uses_backend_labels() {
        assert_eq!(
            serde_json::to_string(&Department::Sanitation).unwrap(),
            r#""Sanitation Department""#
        );
        let d: Department = serde_json::from_str(r#""roads""#).unwrap();
        assert_eq!(d, Department::Roads);
        assert!(serde_json::from_str::<Department>(r#""Parks""#).is_err());
    }

    #[test]
    fn test_five_departments() {
        assert_eq!(Department::ALL.len(), 5);
        for d in Department::ALL {
            assert_eq!(Department::from_label(d.label()), Some(d));
        }
    }
}
