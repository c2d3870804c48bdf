//! Filtered, paginated views over record collections.
//!
//! [`CollectionView`] is generic over any record exposing searchable text via
//! [`Searchable`]; it is used for both the project list and the per-project
//! link table. Filtering is recomputed from the source records and the query
//! on every read, so a view can never serve a stale filtered set.

use crate::config::constants::PAGE_SIZE;

/// A record that can be matched against a free-text search query.
pub trait Searchable {
    /// The concatenated searchable fields of the record (e.g. URL and title
    /// for a link, name and domain for a project).
    fn search_text(&self) -> String;
}

/// Current filter and pagination parameters of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring query; a blank query matches everything.
    pub query: String,
    /// 1-indexed current page, always within `[1, total_pages]`.
    pub page: usize,
    /// Fixed number of rows per page.
    pub page_size: usize,
}

/// A searchable, paginated projection over an ordered record set.
///
/// Records keep their insertion order from the source fetch; filtering is
/// stable and never re-sorts. Changing the query resets to the first page,
/// and the page is re-clamped whenever the filtered set shrinks.
#[derive(Debug, Clone)]
pub struct CollectionView<T> {
    records: Vec<T>,
    query: String,
    page: usize,
}

impl<T: Searchable + Clone> CollectionView<T> {
    /// Creates a view over `records` with a blank query on page 1.
    pub fn new(records: Vec<T>) -> Self {
        CollectionView {
            records,
            query: String::new(),
            page: 1,
        }
    }

    /// All source records in insertion order, ignoring the filter.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Number of source records, ignoring the filter.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the source record set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The current query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The current 1-indexed page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Snapshot of the current filter parameters.
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            query: self.query.clone(),
            page: self.page,
            page_size: PAGE_SIZE,
        }
    }

    fn matches(&self, record: &T) -> bool {
        if self.query.trim().is_empty() {
            return true;
        }
        record
            .search_text()
            .to_lowercase()
            .contains(&self.query.to_lowercase())
    }

    /// The filtered records in insertion order.
    ///
    /// Recomputed from the source records and the query on every call.
    pub fn filtered(&self) -> Vec<&T> {
        self.records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Number of records matching the current query.
    pub fn filtered_count(&self) -> usize {
        self.records.iter().filter(|r| self.matches(r)).count()
    }

    /// Total number of pages for the current filtered set (at least 1).
    pub fn total_pages(&self) -> usize {
        self.filtered_count().div_ceil(PAGE_SIZE).max(1)
    }

    /// Sets the search query and resets to the first page.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    /// Moves to page `n`, clamped to `[1, total_pages]`.
    pub fn set_page(&mut self, n: usize) {
        self.page = n.clamp(1, self.total_pages());
    }

    /// The slice of filtered records on the current page.
    ///
    /// Never returns more than the page size; the last page may be shorter.
    pub fn current_page(&self) -> Vec<T> {
        let filtered = self.filtered();
        let start = (self.page - 1) * PAGE_SIZE;
        filtered
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect()
    }

    /// Replaces the full record set (e.g. after a crawl refresh), keeping the
    /// query and re-clamping the page.
    pub fn replace_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.page = self.page.clamp(1, self.total_pages());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(String);

    impl Searchable for Item {
        fn search_text(&self) -> String {
            self.0.clone()
        }
    }

    fn items(names: &[&str]) -> Vec<Item> {
        names.iter().map(|n| Item(n.to_string())).collect()
    }

    #[test]
    fn test_blank_query_is_identity() {
        let view = CollectionView::new(items(&["alpha", "beta", "gamma"]));
        let filtered: Vec<_> = view.filtered().into_iter().map(|i| i.0.as_str()).collect();
        assert_eq!(filtered, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_stable() {
        let mut view = CollectionView::new(items(&["Alpha", "beta", "ALPHABET", "gamma"]));
        view.set_query("alpha");
        let filtered: Vec<_> = view.filtered().into_iter().map(|i| i.0.as_str()).collect();
        assert_eq!(filtered, vec!["Alpha", "ALPHABET"]);
    }

    #[test]
    fn test_query_change_resets_page() {
        let names: Vec<String> = (0..25).map(|i| format!("item-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let mut view = CollectionView::new(items(&refs));
        view.set_page(3);
        assert_eq!(view.page(), 3);
        view.set_query("item");
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let view: CollectionView<Item> = CollectionView::new(Vec::new());
        assert_eq!(view.total_pages(), 1);
        assert!(view.current_page().is_empty());
    }

    #[test]
    fn test_page_clamping() {
        let names: Vec<String> = (0..25).map(|i| format!("item-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let mut view = CollectionView::new(items(&refs));
        assert_eq!(view.total_pages(), 3);

        view.set_page(99);
        assert_eq!(view.page(), 3);
        view.set_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_current_page_slicing() {
        let names: Vec<String> = (0..25).map(|i| format!("item-{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let mut view = CollectionView::new(items(&refs));

        assert_eq!(view.current_page().len(), 10);
        view.set_page(3);
        let last = view.current_page();
        assert_eq!(last.len(), 5);
        assert_eq!(last[0].0, "item-20");
    }

    #[test]
    fn test_replace_records_reclamps_page() {
        let names: Vec<String> = (0..25).map(|i| format!("item-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let mut view = CollectionView::new(items(&refs));
        view.set_page(3);

        view.replace_records(items(&["only"]));
        assert_eq!(view.page(), 1);
        assert_eq!(view.current_page().len(), 1);
    }

    #[test]
    fn test_filter_state_snapshot() {
        let mut view = CollectionView::new(items(&["alpha"]));
        view.set_query("al");
        let state = view.filter_state();
        assert_eq!(state.query, "al");
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, PAGE_SIZE);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_filtered_is_subset_and_matches(
            names in prop::collection::vec("[a-z]{1,12}", 0..40),
            query in "[a-z]{1,4}"
        ) {
            let records = items(&names.iter().map(|s| s.as_str()).collect::<Vec<_>>());
            let mut view = CollectionView::new(records);
            view.set_query(&query);

            for item in view.filtered() {
                prop_assert!(names.contains(&item.0));
                prop_assert!(item.0.to_lowercase().contains(&query.to_lowercase()));
            }
        }

        #[test]
        fn test_total_pages_formula(
            names in prop::collection::vec("[a-z]{1,12}", 0..60)
        ) {
            let records = items(&names.iter().map(|s| s.as_str()).collect::<Vec<_>>());
            let view = CollectionView::new(records);
            let expected = (names.len() + PAGE_SIZE - 1) / PAGE_SIZE;
            prop_assert_eq!(view.total_pages(), expected.max(1));
        }

        #[test]
        fn test_current_page_never_exceeds_page_size(
            names in prop::collection::vec("[a-z]{1,12}", 0..60),
            page in 0usize..10
        ) {
            let records = items(&names.iter().map(|s| s.as_str()).collect::<Vec<_>>());
            let mut view = CollectionView::new(records);
            view.set_page(page);
            prop_assert!(view.current_page().len() <= PAGE_SIZE);
            prop_assert!(view.page() >= 1);
            prop_assert!(view.page() <= view.total_pages());
        }
    }
}
