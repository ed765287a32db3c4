//! The derived-view pipeline: filter, search, sort, paginate.
//!
//! [`derive_view`] is a pure function from (records, query) to the shaped
//! row list; [`Dashboard`] is the state holder that re-runs it on every
//! input change, the way the rendering layer expects. Recomputation always
//! snaps pagination back to the first page so a narrowed result set never
//! leaves the user stranded on an empty page.

use std::cmp::Ordering;

use crate::record::{Category, FeedbackRecord};
use crate::stats::DashboardStats;
use chrono::{DateTime, Utc};

/// Rows shown per dashboard page.
pub const PAGE_SIZE: usize = 5;

/// Field the view is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Order by creation timestamp.
    #[default]
    CreatedAt,
    /// Order by author name, case-sensitively.
    Name,
    /// Order by raw category keyword, case-sensitively.
    Category,
}

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first; the dashboard opens on newest-first dates.
    #[default]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Category restriction applied before searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Keep every record.
    #[default]
    All,
    /// Keep records of one category; records without a category count as
    /// general.
    Only(Category),
}

impl CategoryFilter {
    fn keeps(self, record: &FeedbackRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => record.category_or_default() == category,
        }
    }
}

/// Everything the derived view depends on besides the records themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Case-insensitive substring matched against name, email, or message.
    /// Empty keeps every record.
    pub search: String,
    /// Category restriction.
    pub category: CategoryFilter,
    /// Active sort field.
    pub sort_field: SortField,
    /// Active sort direction.
    pub direction: SortDirection,
}

/// Compute the filtered and sorted row list for a query.
///
/// Ties keep their relative order: the sort is stable, and reversing the
/// comparator rather than the rows preserves that for descending order too.
pub fn derive_view(records: &[FeedbackRecord], query: &DashboardQuery) -> Vec<FeedbackRecord> {
    let needle = query.search.to_lowercase();
    let mut rows: Vec<FeedbackRecord> = records
        .iter()
        .filter(|record| query.category.keeps(record))
        .filter(|record| matches_search(record, &needle))
        .cloned()
        .collect();
    rows.sort_by(|a, b| compare(a, b, query.sort_field, query.direction));
    rows
}

fn matches_search(record: &FeedbackRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(needle)
        || record.email.to_lowercase().contains(needle)
        || record.message.to_lowercase().contains(needle)
}

fn compare(
    a: &FeedbackRecord,
    b: &FeedbackRecord,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    let ordering = match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Category => a.category_key().cmp(b.category_key()),
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Dashboard state: the fetched record set plus every knob that shapes the
/// derived view.
#[derive(Debug, Clone)]
pub struct Dashboard {
    records: Vec<FeedbackRecord>,
    query: DashboardQuery,
    view: Vec<FeedbackRecord>,
    page: usize,
    pending_delete: Option<String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            query: DashboardQuery::default(),
            view: Vec::new(),
            page: 1,
            pending_delete: None,
        }
    }
}

impl Dashboard {
    /// Empty dashboard with the default query (newest first, no filters).
    pub fn new() -> Self {
        Self::default()
    }

    /// The full unfiltered record set, as used by the statistics tiles.
    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    /// The active query.
    pub fn query(&self) -> &DashboardQuery {
        &self.query
    }

    /// The full filtered and sorted view; this is what CSV export reads.
    pub fn view(&self) -> &[FeedbackRecord] {
        &self.view
    }

    /// Replace the record set after a fetch. A failed fetch should simply
    /// not call this, leaving the previous state intact.
    pub fn set_records(&mut self, records: Vec<FeedbackRecord>) {
        self.records = records;
        self.recompute();
    }

    /// Update the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.recompute();
    }

    /// Update the category restriction.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.query.category = filter;
        self.recompute();
    }

    /// Select a sort field: a new field starts ascending, re-selecting the
    /// current field flips the direction.
    pub fn sort_by(&mut self, field: SortField) {
        if self.query.sort_field == field {
            self.query.direction = self.query.direction.toggled();
        } else {
            self.query.sort_field = field;
            self.query.direction = SortDirection::Ascending;
        }
        self.recompute();
    }

    /// Flip the sort direction without changing the field.
    pub fn toggle_direction(&mut self) {
        self.query.direction = self.query.direction.toggled();
        self.recompute();
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages in the current view.
    pub fn total_pages(&self) -> usize {
        self.view.len().div_ceil(PAGE_SIZE)
    }

    /// Jump to a page, clamped to the valid range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    /// The rows of the current page.
    pub fn page_rows(&self) -> &[FeedbackRecord] {
        let start = (self.page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.view.len());
        self.view.get(start..end).unwrap_or_default()
    }

    /// Drop a record locally after the server confirmed its deletion.
    /// Returns whether the record was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.recompute();
        }
        removed
    }

    /// Mark a delete as in flight so the view can disable that record's own
    /// delete control. Only one delete is tracked at a time, matching the
    /// single confirmation dialog the dashboard shows.
    pub fn begin_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    /// Clear the in-flight delete marker, whether it succeeded or failed.
    pub fn finish_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Whether the given record's delete is in flight.
    pub fn is_delete_pending(&self, id: &str) -> bool {
        self.pending_delete.as_deref() == Some(id)
    }

    /// Aggregate statistics over the full (unfiltered) record set.
    pub fn stats(&self, now: DateTime<Utc>) -> DashboardStats {
        DashboardStats::compute(&self.records, now)
    }

    fn recompute(&mut self) {
        self.view = derive_view(&self.records, &self.query);
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, name: &str, category: Option<&str>, day: u32) -> FeedbackRecord {
        let at = Utc
            .with_ymd_and_hms(2025, 7, day, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        FeedbackRecord {
            id: id.to_owned(),
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            message: format!("message from {name}"),
            category: category.map(str::to_owned),
            created_at: at,
            updated_at: at,
        }
    }

    fn ids(rows: &[FeedbackRecord]) -> Vec<&str> {
        rows.iter().map(|row| row.id.as_str()).collect()
    }

    #[test]
    fn category_filter_keeps_exactly_the_matching_records() {
        let records = vec![
            record("a", "Ann", Some("general"), 1),
            record("b", "Ben", Some("bug"), 2),
            record("c", "Cat", Some("feature"), 3),
            record("d", "Dee", Some("bug"), 4),
        ];
        let query = DashboardQuery {
            category: CategoryFilter::Only(Category::Bug),
            ..DashboardQuery::default()
        };
        assert_eq!(ids(&derive_view(&records, &query)), ["d", "b"]);
    }

    #[test]
    fn records_without_category_count_as_general() {
        let records = vec![record("a", "Ann", None, 1), record("b", "Ben", Some("bug"), 2)];
        let query = DashboardQuery {
            category: CategoryFilter::Only(Category::General),
            ..DashboardQuery::default()
        };
        assert_eq!(ids(&derive_view(&records, &query)), ["a"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let records = vec![record("a", "Jane Doe", None, 1), record("b", "Ben", None, 2)];
        let mut query = DashboardQuery {
            search: "JANE".to_owned(),
            ..DashboardQuery::default()
        };
        assert_eq!(ids(&derive_view(&records, &query)), ["a"]);

        // Matches the email too, and misses cleanly.
        query.search = "ben@example".to_owned();
        assert_eq!(ids(&derive_view(&records, &query)), ["b"]);
        query.search = "xyz".to_owned();
        assert!(derive_view(&records, &query).is_empty());
    }

    #[test]
    fn name_sort_orders_alphabetically_and_reverses() {
        let records = vec![
            record("a", "Cat", None, 1),
            record("b", "Ann", None, 2),
            record("c", "Ben", None, 3),
        ];
        let mut dashboard = Dashboard::new();
        dashboard.set_records(records);

        dashboard.sort_by(SortField::Name);
        assert_eq!(ids(dashboard.view()), ["b", "c", "a"]);

        // Re-selecting the same field flips the direction.
        dashboard.sort_by(SortField::Name);
        assert_eq!(ids(dashboard.view()), ["a", "c", "b"]);
    }

    #[test]
    fn default_view_is_newest_first() {
        let records = vec![
            record("old", "Ann", None, 1),
            record("new", "Ben", None, 20),
            record("mid", "Cat", None, 10),
        ];
        let view = derive_view(&records, &DashboardQuery::default());
        assert_eq!(ids(&view), ["new", "mid", "old"]);
    }

    #[test]
    fn ties_keep_their_relative_order() {
        let mut records = vec![
            record("a", "Same", None, 1),
            record("b", "Same", None, 2),
            record("c", "Same", None, 3),
        ];
        // Identical names: ascending and descending must both preserve
        // the input order of the tied group.
        for record in &mut records {
            record.name = "Same".to_owned();
        }
        let ascending = DashboardQuery {
            sort_field: SortField::Name,
            direction: SortDirection::Ascending,
            ..DashboardQuery::default()
        };
        let descending = DashboardQuery {
            direction: SortDirection::Descending,
            ..ascending.clone()
        };
        assert_eq!(ids(&derive_view(&records, &ascending)), ["a", "b", "c"]);
        assert_eq!(ids(&derive_view(&records, &descending)), ["a", "b", "c"]);
    }

    #[test]
    fn pagination_slices_fixed_pages() {
        let records: Vec<FeedbackRecord> = (1..=12)
            .map(|i| record(&format!("r{i}"), &format!("User{i:02}"), None, i))
            .collect();
        let mut dashboard = Dashboard::new();
        dashboard.set_records(records);
        dashboard.sort_by(SortField::Name); // ascending: r1..r12

        assert_eq!(dashboard.total_pages(), 3);
        assert_eq!(ids(dashboard.page_rows()), ["r1", "r2", "r3", "r4", "r5"]);

        dashboard.set_page(3);
        assert_eq!(ids(dashboard.page_rows()), ["r11", "r12"]);

        // Out-of-range targets clamp instead of showing an empty page.
        dashboard.set_page(99);
        assert_eq!(dashboard.page(), 3);
    }

    #[test]
    fn filter_changes_reset_the_page() {
        let records: Vec<FeedbackRecord> = (1..=12)
            .map(|i| record(&format!("r{i}"), &format!("User{i:02}"), None, i))
            .collect();
        let mut dashboard = Dashboard::new();
        dashboard.set_records(records);
        dashboard.set_page(3);

        dashboard.set_search("user".to_owned());
        assert_eq!(dashboard.page(), 1);
    }

    #[test]
    fn removing_a_record_updates_the_view() {
        let mut dashboard = Dashboard::new();
        dashboard.set_records(vec![record("a", "Ann", None, 1), record("b", "Ben", None, 2)]);

        assert!(dashboard.remove("a"));
        assert!(!dashboard.remove("a"));
        assert_eq!(ids(dashboard.view()), ["b"]);
    }

    #[test]
    fn delete_tracking_only_flags_the_targeted_record() {
        let mut dashboard = Dashboard::new();
        dashboard.begin_delete("a");
        assert!(dashboard.is_delete_pending("a"));
        assert!(!dashboard.is_delete_pending("b"));
        dashboard.finish_delete();
        assert!(!dashboard.is_delete_pending("a"));
    }
}
