//! # Tabular List Presenter
//!
//! Derives the visible page of a record list from the current search term,
//! sort state and page state. Every screen that shows a list (users,
//! services, transactions, generic records) goes through [`present`], which
//! is a pure function recomputed on each state change.
//!
//! ## Pipeline
//! 1. filter: case-insensitive substring match against every field's string form
//! 2. sort: stable, on one field, either direction
//! 3. paginate: fixed page size, page clamped into range

use serde::{Deserialize, Serialize};

use crate::record::TableRecord;

/// Rows per page used by every list screen unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Which column the list is sorted on, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: Some(field.into()),
            direction,
        }
    }

    /// Header click: the active field flips direction, any other field
    /// becomes active ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field.as_deref() == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn is_active(&self, field: &str) -> bool {
        self.field.as_deref() == Some(field)
    }

    /// Glyph shown next to a column header.
    pub fn indicator(&self, field: &str) -> &'static str {
        if !self.is_active(field) {
            return "⇅";
        }
        match self.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// 1-based current page and fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub current: usize,
    pub size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(size: usize) -> Self {
        Self { current: 1, size }
    }

    /// Page size actually used; zero is read as one.
    pub fn effective_size(&self) -> usize {
        self.size.max(1)
    }

    pub fn total_pages(&self, filtered: usize) -> usize {
        filtered.div_ceil(self.effective_size())
    }

    /// Current page forced into `[1, total_pages]`, or 1 when nothing matches.
    pub fn clamped(&self, filtered: usize) -> usize {
        let total = self.total_pages(filtered);
        if total == 0 {
            1
        } else {
            self.current.clamp(1, total)
        }
    }
}

/// Complete presentation state of one list screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableState {
    pub search: String,
    pub sort: SortState,
    pub page: PageState,
}

impl TableState {
    pub fn with_page_size(size: usize) -> Self {
        Self {
            page: PageState::new(size),
            ..Self::default()
        }
    }

    /// Typing in the search box always returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page.current = 1;
    }

    pub fn toggle_sort(&mut self, field: &str) {
        self.sort.toggle(field);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page.current = page.max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        let last = total_pages.max(1);
        self.page.current = (self.page.current + 1).min(last);
    }

    /// Pull a stored page that ran past the end back to the last page.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page.current = self.page.current.min(total_pages.max(1)).max(1);
    }

    pub fn prev_page(&mut self) {
        self.page.current = self.page.current.saturating_sub(1).max(1);
    }

    pub fn present<'a, R: TableRecord>(&self, records: &'a [R]) -> TableView<'a, R> {
        present(records, &self.search, &self.sort, self.page)
    }
}

/// The rendered slice plus the counts shown under the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a, R> {
    pub rows: Vec<&'a R>,
    pub total_filtered: usize,
    pub total_pages: usize,
    /// Page the rows belong to after clamping
    pub page: usize,
    /// 1-based index of the first row shown, 0 when empty
    pub first_index: usize,
    /// 1-based index of the last row shown, 0 when empty
    pub last_index: usize,
}

impl<R> TableView<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Labels for the numbered pager buttons, `1..=total_pages`.
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }

    /// "Showing 11 to 20 of 42 results"
    pub fn summary(&self) -> String {
        if self.total_filtered == 0 {
            return "No results".to_string();
        }
        format!(
            "Showing {} to {} of {} results",
            self.first_index, self.last_index, self.total_filtered
        )
    }
}

pub fn matches_search<R: TableRecord>(record: &R, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record
        .search_values()
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

pub fn filter_records<'a, R: TableRecord>(records: &'a [R], term: &str) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| matches_search(*record, term))
        .collect()
}

/// Stable in-place sort on the active field. No active field leaves the
/// input order untouched.
pub fn sort_records<R: TableRecord>(rows: &mut [&R], sort: &SortState) {
    let Some(field) = sort.field.as_deref() else {
        return;
    };
    rows.sort_by(|a, b| {
        let ordering = a.field(field).compare(&b.field(field));
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Slice out one page. Returns the rows and the clamped page number.
pub fn paginate<T: Copy>(rows: &[T], page: PageState) -> (Vec<T>, usize) {
    let current = page.clamped(rows.len());
    let size = page.effective_size();
    let start = (current - 1) * size;
    let slice = rows.iter().skip(start).take(size).copied().collect();
    (slice, current)
}

pub fn present<'a, R: TableRecord>(
    records: &'a [R],
    search: &str,
    sort: &SortState,
    page: PageState,
) -> TableView<'a, R> {
    let mut filtered = filter_records(records, search);
    sort_records(&mut filtered, sort);

    let total_filtered = filtered.len();
    let total_pages = page.total_pages(total_filtered);
    let (rows, current) = paginate(&filtered, page);

    let (first_index, last_index) = if rows.is_empty() {
        (0, 0)
    } else {
        let first = (current - 1) * page.effective_size() + 1;
        (first, first + rows.len() - 1)
    };

    TableView {
        rows,
        total_filtered,
        total_pages,
        page: current,
        first_index,
        last_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldValue, Record};

    fn people() -> Vec<Record> {
        vec![
            Record::new("1").with("Name", "Bob").with("RoleId", 2i64),
            Record::new("2").with("Name", "Ann").with("RoleId", 1i64),
            Record::new("3").with("Name", "Cid").with("RoleId", 1i64),
        ]
    }

    fn names(view: &TableView<'_, Record>) -> Vec<String> {
        view.rows
            .iter()
            .filter_map(|row| row.field("Name").search_text())
            .collect()
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let records = people();
        let sort = SortState::by("Name", SortDirection::Ascending);
        let view = present(&records, "", &sort, PageState::new(10));
        assert_eq!(names(&view), vec!["Ann", "Bob", "Cid"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let records = people();
        let view = present(&records, "b", &SortState::default(), PageState::new(10));
        assert_eq!(names(&view), vec!["Bob"]);
        assert_eq!(view.total_filtered, 1);
    }

    #[test]
    fn test_second_page_of_unsorted_records() {
        let records = people();
        let page = PageState { current: 2, size: 2 };
        let view = present(&records, "", &SortState::default(), page);
        assert_eq!(names(&view), vec!["Cid"]);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.summary(), "Showing 3 to 3 of 3 results");
        assert!(view.has_prev());
        assert!(!view.has_next());
    }

    #[test]
    fn test_stable_sort_on_ties() {
        let records = people();
        let ascending = SortState::by("RoleId", SortDirection::Ascending);
        let view = present(&records, "", &ascending, PageState::new(10));
        assert_eq!(names(&view), vec!["Ann", "Cid", "Bob"]);

        let descending = SortState::by("RoleId", SortDirection::Descending);
        let view = present(&records, "", &descending, PageState::new(10));
        assert_eq!(names(&view), vec!["Bob", "Ann", "Cid"]);
    }

    #[test]
    fn test_missing_sort_field_comes_first() {
        let records = vec![
            Record::new("1").with("Name", "Zed").with("Score", 5i64),
            Record::new("2").with("Name", "Amy"),
            Record::new("3").with("Name", "Kim").with("Score", 1i64),
        ];
        let sort = SortState::by("Score", SortDirection::Ascending);
        let view = present(&records, "", &sort, PageState::new(10));
        assert_eq!(names(&view), vec!["Amy", "Kim", "Zed"]);
        assert!(view.rows[0].field("Score").is_missing());
    }

    #[test]
    fn test_empty_inputs_force_first_page() {
        let records: Vec<Record> = Vec::new();
        let page = PageState { current: 4, size: 10 };
        let view = present(&records, "", &SortState::default(), page);
        assert!(view.is_empty());
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.summary(), "No results");

        let records = people();
        let view = present(&records, "nobody", &SortState::default(), page);
        assert!(view.is_empty());
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_page_past_end_is_clamped() {
        let records = people();
        let page = PageState { current: 9, size: 2 };
        let view = present(&records, "", &SortState::default(), page);
        assert_eq!(view.page, 2);
        assert_eq!(names(&view), vec!["Cid"]);
    }

    #[test]
    fn test_zero_page_size_reads_as_one() {
        let records = people();
        let page = PageState { current: 1, size: 0 };
        let view = present(&records, "", &SortState::default(), page);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.total_pages, 3);
    }

    #[test]
    fn test_search_matches_non_text_fields() {
        let records = vec![
            Record::new("1").with("Active", true).with("Amount", 25.5),
            Record::new("2").with("Active", false).with("Amount", FieldValue::Number(3.0)),
        ];
        assert_eq!(filter_records(&records, "TRUE").len(), 1);
        assert_eq!(filter_records(&records, "25.5").len(), 1);
        assert_eq!(filter_records(&records, "3").len(), 1);
    }

    #[test]
    fn test_sort_toggle_transitions() {
        let mut sort = SortState::default();
        assert_eq!(sort.indicator("Name"), "⇅");

        sort.toggle("Name");
        assert_eq!(sort, SortState::by("Name", SortDirection::Ascending));
        assert_eq!(sort.indicator("Name"), "↑");

        sort.toggle("Name");
        assert_eq!(sort.direction, SortDirection::Descending);
        assert_eq!(sort.indicator("Name"), "↓");

        sort.toggle("Email");
        assert_eq!(sort, SortState::by("Email", SortDirection::Ascending));
        assert_eq!(sort.indicator("Name"), "⇅");
    }

    #[test]
    fn test_state_transitions() {
        let mut state = TableState::with_page_size(2);
        state.set_page(3);
        state.toggle_sort("Name");
        assert_eq!(state.page.current, 3);

        state.set_search("an");
        assert_eq!(state.page.current, 1);
        assert_eq!(state.search, "an");

        state.prev_page();
        assert_eq!(state.page.current, 1);
        state.next_page(2);
        state.next_page(2);
        assert_eq!(state.page.current, 2);

        state.set_page(0);
        assert_eq!(state.page.current, 1);
    }

    #[test]
    fn test_page_numbers_cover_every_page() {
        let records = people();
        let view = present(&records, "", &SortState::default(), PageState::new(2));
        assert_eq!(view.page_numbers(), vec![1, 2]);

        let view = present(&records, "zzz", &SortState::default(), PageState::new(2));
        assert!(view.page_numbers().is_empty());
    }

    #[test]
    fn test_paging_with_view_totals_stays_in_range() {
        let records = people();
        let mut state = TableState::with_page_size(1);
        for _ in 0..5 {
            let total = state.present(&records).total_pages;
            state.next_page(total);
        }
        assert_eq!(state.page.current, 3);
        assert_eq!(names(&state.present(&records)), vec!["Cid"]);
        for _ in 0..5 {
            state.prev_page();
        }
        assert_eq!(state.page.current, 1);

        state.set_page(9);
        state.clamp_page(3);
        state.prev_page();
        assert_eq!(state.page.current, 2);
    }
}
