use serde::Deserialize;

use crate::features::complaints::models::Complaint;

/// Every shape the backend uses to return complaints.
///
/// Anything that is not one of these is rejected at decode time instead of
/// being coerced into a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ComplaintEnvelope {
    /// `[{...}, {...}]`
    List(Vec<Complaint>),
    /// `{"complaints": [...], "total": n}`
    Wrapped {
        complaints: Vec<Complaint>,
        #[serde(default)]
        total: Option<i64>,
    },
    /// `{"complaint": {...}}`
    Single { complaint: Complaint },
    /// `{...}` (a bare complaint object)
    Bare(Complaint),
}

impl ComplaintEnvelope {
    /// Total reported by the backend, falling back to the number of items
    pub fn total(&self) -> i64 {
        match self {
            ComplaintEnvelope::Wrapped {
                total: Some(total), ..
            } => *total,
            other => other.len() as i64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ComplaintEnvelope::List(items) | ComplaintEnvelope::Wrapped { complaints: items, .. } => {
                items.len()
            }
            ComplaintEnvelope::Single { .. } | ComplaintEnvelope::Bare(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<Complaint> {
        match self {
            ComplaintEnvelope::List(items) | ComplaintEnvelope::Wrapped { complaints: items, .. } => {
                items
            }
            ComplaintEnvelope::Single { complaint } | ComplaintEnvelope::Bare(complaint) => {
                vec![complaint]
            }
        }
    }

    /// First complaint, if any (detail endpoints)
    pub fn into_first(self) -> Option<Complaint> {
        self.into_vec().into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<ComplaintEnvelope, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_array_shape() {
        let env = decode(r#"[{"_id": "a"}, {"_id": "b"}]"#).unwrap();
        assert!(matches!(env, ComplaintEnvelope::List(_)));
        assert_eq!(env.total(), 2);
    }

    #[test]
    fn test_wrapped_shape_keeps_backend_total() {
        let env = decode(r#"{"complaints": [{"_id": "a"}], "total": 40, "departments": []}"#)
            .unwrap();
        assert_eq!(env.total(), 40);
        assert_eq!(env.len(), 1);
        assert_eq!(env.into_vec()[0].id, "a");
    }

    #[test]
    fn test_single_and_bare_shapes() {
        let single = decode(r#"{"complaint": {"_id": "a", "title": "x"}}"#).unwrap();
        assert!(matches!(single, ComplaintEnvelope::Single { .. }));
        assert_eq!(single.into_first().unwrap().title, "x");

        let bare = decode(r#"{"_id": "b", "title": "y"}"#).unwrap();
        assert!(matches!(bare, ComplaintEnvelope::Bare(_)));
        assert_eq!(bare.into_vec().len(), 1);
    }

    #[test]
    fn test_unexpected_shapes_are_rejected() {
        assert!(decode(r#""ok""#).is_err());
        assert!(decode(r#"42"#).is_err());
        assert!(decode(r#"{"message": "nothing here"}"#).is_err());
        assert!(decode(r#"{"complaints": "oops"}"#).is_err());
    }

    #[test]
    fn test_empty_list() {
        let env = decode("[]").unwrap();
        assert_eq!(env.total(), 0);
        assert!(env.into_first().is_none());
    }
}
