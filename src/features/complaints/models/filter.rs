use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::complaints::models::Complaint;
use crate::shared::constants::COMPLAINT_PAGE_SIZE;
use crate::shared::types::{paginate, PaginationMeta};

/// In-memory filters for a fetched complaint list.
///
/// Each non-empty filter is a case-insensitive substring match on the field
/// as the backend sent it; all non-empty filters must match. Filter text is
/// used as typed, surrounding whitespace included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComplaintFilters {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Title,
    Category,
    Priority,
    Status,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl ComplaintFilters {
    pub fn is_empty(&self) -> bool {
        [&self.title, &self.category, &self.priority, &self.status]
            .iter()
            .all(|f| f.is_empty())
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Title => &self.title,
            FilterField::Category => &self.category,
            FilterField::Priority => &self.priority,
            FilterField::Status => &self.status,
        }
    }

    fn slot(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Title => &mut self.title,
            FilterField::Category => &mut self.category,
            FilterField::Priority => &mut self.priority,
            FilterField::Status => &mut self.status,
        }
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        contains_ignore_case(&complaint.title, &self.title)
            && contains_ignore_case(&complaint.category, &self.category)
            && contains_ignore_case(complaint.priority_label(), &self.priority)
            && contains_ignore_case(&complaint.status, &self.status)
    }

    pub fn apply<'a>(&self, complaints: &'a [Complaint]) -> Vec<&'a Complaint> {
        complaints.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Filter + page state of a complaint table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintListView {
    filters: ComplaintFilters,
    current_page: usize,
    page_size: usize,
}

impl Default for ComplaintListView {
    fn default() -> Self {
        Self {
            filters: ComplaintFilters::default(),
            current_page: 1,
            page_size: COMPLAINT_PAGE_SIZE,
        }
    }
}

impl ComplaintListView {
    pub fn new(filters: ComplaintFilters, page: usize) -> Self {
        Self {
            filters,
            current_page: page.max(1),
            page_size: COMPLAINT_PAGE_SIZE,
        }
    }

    pub fn filters(&self) -> &ComplaintFilters {
        &self.filters
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Changing any filter sends the view back to the first page
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        *self.filters.slot(field) = value.into();
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Filter then slice `complaints` for the current page
    pub fn render<'a>(&self, complaints: &'a [Complaint]) -> (Vec<&'a Complaint>, PaginationMeta) {
        let filtered = self.filters.apply(complaints);
        let meta = PaginationMeta::new(self.current_page, self.page_size, filtered.len());
        let page = paginate(&filtered, self.current_page, self.page_size).to_vec();
        (page, meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::complaints::models::{ComplaintStatus, Priority};
    use crate::shared::test_helpers::sample_complaint;

    fn fixtures() -> Vec<Complaint> {
        vec![
            sample_complaint("1", "Pothole on Main St", "roads", Priority::High, ComplaintStatus::Open),
            sample_complaint("2", "Garbage pile", "sanitation", Priority::Medium, ComplaintStatus::Open),
            sample_complaint("3", "Broken streetlight", "electricity", Priority::Low, ComplaintStatus::Resolved),
            sample_complaint("4", "Pothole near school", "roads", Priority::Low, ComplaintStatus::InProgress),
            sample_complaint("5", "Leaking pipe", "water", Priority::High, ComplaintStatus::Resolved),
        ]
    }

    #[test]
    fn test_status_filter_returns_exact_subset() {
        let complaints = fixtures();
        let filters = ComplaintFilters {
            status: "open".to_string(),
            ..Default::default()
        };
        let ids: Vec<&str> = filters.apply(&complaints).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let expected: Vec<&str> = complaints
            .iter()
            .filter(|c| c.status.to_lowercase().contains("open"))
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_status_filter_reads_backend_label() {
        let mut complaints = fixtures();
        complaints[0].status = "New".to_string();
        complaints[2].status = "In Progress".to_string();
        complaints[3].status = "pending".to_string();

        let ids = |status: &str| -> Vec<String> {
            let filters = ComplaintFilters {
                status: status.to_string(),
                ..Default::default()
            };
            filters.apply(&complaints).iter().map(|c| c.id.clone()).collect()
        };
        assert_eq!(ids("in progress"), vec!["3"]);
        assert_eq!(ids("new"), vec!["1"]);
        assert_eq!(ids("pend"), vec!["4"]);
        assert_eq!(ids("open"), vec!["2"]);
    }

    #[test]
    fn test_filter_text_is_not_trimmed() {
        let complaints = fixtures();
        let filters = ComplaintFilters {
            title: " pothole".to_string(),
            ..Default::default()
        };
        assert!(!filters.is_empty());
        let ids: Vec<&str> = filters.apply(&complaints).iter().map(|c| c.id.as_str()).collect();
        // both pothole titles start with the word
        assert!(ids.is_empty());

        let filters = ComplaintFilters {
            title: "hole ".to_string(),
            ..Default::default()
        };
        assert_eq!(filters.apply(&complaints).len(), 2);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let complaints = fixtures();
        let filters = ComplaintFilters {
            title: "POTHOLE".to_string(),
            priority: "low".to_string(),
            ..Default::default()
        };
        let ids: Vec<&str> = filters.apply(&complaints).iter().map(|c| c.id.as_str()).collect();
        // "or" would also have returned 1 and 3
        assert_eq!(ids, vec!["4"]);
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let complaints = fixtures();
        let filters = ComplaintFilters::default();
        assert!(filters.is_empty());
        assert_eq!(filters.apply(&complaints).len(), complaints.len());
    }

    #[test]
    fn test_missing_priority_only_matches_empty_filter() {
        let mut complaint = fixtures().remove(0);
        complaint.priority = None;
        let filters = ComplaintFilters {
            priority: "high".to_string(),
            ..Default::default()
        };
        assert!(!filters.matches(&complaint));
    }

    #[test]
    fn test_page_count_is_ceiling_of_filtered_items() {
        let complaints: Vec<Complaint> = (0..12)
            .map(|i| {
                sample_complaint(
                    &i.to_string(),
                    "Item",
                    "roads",
                    Priority::Low,
                    ComplaintStatus::Open,
                )
            })
            .collect();

        let view = ComplaintListView::new(ComplaintFilters::default(), 3);
        let (page, meta) = view.render(&complaints);
        assert_eq!(meta.total_items, 12);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "10");
    }

    #[test]
    fn test_changing_filter_resets_page() {
        let mut view = ComplaintListView::default();
        view.set_page(4);
        assert_eq!(view.current_page(), 4);

        view.set_filter(FilterField::Category, "roads");
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.filters().get(FilterField::Category), "roads");

        view.set_page(2);
        view.set_filter(FilterField::Category, "roads");
        assert_eq!(view.current_page(), 1, "even an unchanged value resets the page");
    }
}
